mod globe_points;
mod online_users;

pub use globe_points::LoadGlobePoints;
pub use online_users::{ListOnlineUsers, DEFAULT_ONLINE_LIMIT};
