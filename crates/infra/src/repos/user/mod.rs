mod inmemory;
mod mongo;

pub use inmemory::InMemoryUserRepo;
pub use mongo::MongoUserRepo;
use sehat_saathi_domain::{User, ID};

#[async_trait::async_trait]
pub trait IUserRepo: Send + Sync {
    async fn insert(&self, user: &User) -> anyhow::Result<()>;
    async fn find(&self, user_id: &ID) -> Option<User>;
    /// Emails are matched case insensitively
    async fn find_by_email(&self, email: &str) -> Option<User>;
}
