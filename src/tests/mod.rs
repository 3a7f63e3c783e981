/*!
 * 内存后端上的单元测试集
*/

mod chat_service_test;
mod kv_store_test;
mod streak_test;
mod video_service_test;
