//! Repository layer: one zero-sized struct per table, each taking `&PgPool`.

pub mod blog_post_repo;
pub mod hero_repo;
pub mod media_repo;
pub mod subscriber_repo;
pub mod teaching_post_repo;

pub use blog_post_repo::BlogPostRepo;
pub use hero_repo::HeroRepo;
pub use media_repo::MediaRepo;
pub use subscriber_repo::SubscriberRepo;
pub use teaching_post_repo::TeachingPostRepo;
