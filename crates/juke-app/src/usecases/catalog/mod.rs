mod featured_genres;
mod search_catalog;

pub use featured_genres::GetFeaturedGenres;
pub use search_catalog::SearchCatalog;
