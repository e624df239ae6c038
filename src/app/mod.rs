pub mod error;
pub mod feed;
pub mod likes;
pub mod media;
pub mod social;
pub mod tweets;
pub mod users;
