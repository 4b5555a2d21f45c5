pub mod account;
pub mod auction;
pub mod player;
pub mod season;
pub mod team;

pub use account::{AccountSummary, CreateOwnerRequest, CreateUserRequest, LoginRequest};
pub use account::{OwnerResponse, UserResponse};
pub use auction::{AssignRequest, UnassignRequest, UpdateSaleRequest};
pub use player::{
    ListPlayersQuery, PhotoUpload, PlayerListItem, PlayerResponse, RegistrationForm,
    UpdatePhoneRequest, UpdateRoleRequest,
};
pub use season::{CreateSeasonRequest, SeasonResponse};
pub use team::{CreateTeamRequest, OwnerBrief, RosterQuery, TeamResponse};
