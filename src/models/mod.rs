//! Data models for Ticketbox

pub mod city;
pub mod listing;
pub mod movie;
pub mod rating;
pub mod session;

// Re-export commonly used types
pub use city::City;
pub use listing::{Facets, MovieListQuery, MovieListing, PAGE_SIZE};
pub use movie::{split_genres, Movie, MovieCard, MovieDetails};
pub use rating::{Rating, RatingInput, RatingSummary};
pub use session::SessionClaims;
