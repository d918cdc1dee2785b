// 钉钉开放平台接入
// 令牌缓存、部门树遍历、用户同步与待办

mod client;
mod department;
mod models;
mod sync;
mod todo;
mod token;
mod user;

pub use client::DingClient;
pub use models::DingUser;
pub use sync::SyncReport;
pub use todo::TodoRequest;
pub use token::AccessToken;
