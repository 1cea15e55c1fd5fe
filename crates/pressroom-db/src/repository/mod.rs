//! SurrealDB repository implementations.

mod blog;
mod member;
mod tenant;

pub use blog::SurrealBlogRepository;
pub use member::SurrealMemberRepository;
pub use tenant::SurrealTenantRepository;
