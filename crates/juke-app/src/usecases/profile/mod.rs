//! Music profile use cases.

mod fetch_my_profile;
mod get_profile;
mod search_profiles;
mod update_my_profile;

pub use fetch_my_profile::FetchMyProfile;
pub use get_profile::GetProfile;
pub use search_profiles::SearchProfiles;
pub use update_my_profile::UpdateMyProfile;
