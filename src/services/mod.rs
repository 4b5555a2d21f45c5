pub mod accounts;
pub mod auction;
pub mod error;
pub mod listing;
pub mod registration;
pub mod seasons;
pub mod teams;

pub use accounts::{Account, AccountService};
pub use auction::AuctionService;
pub use error::{ServiceError, ServiceResult};
pub use listing::{ListingRequest, ListingService, ListingView, PlayerListing, PlayerQuery, Tab};
pub use registration::RegistrationService;
pub use seasons::SeasonService;
pub use teams::{Roster, TeamService};
