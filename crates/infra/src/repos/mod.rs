pub mod photos;
pub mod players;
pub mod sessions;
pub mod users;

pub use photos::PhotoRepo;
pub use players::PlayerRepo;
pub use sessions::SessionRepo;
pub use users::UserRepo;
