use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::entities::player;
use crate::services::{SeasonService, ServiceError, ServiceResult};

/// Who the list is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingView {
    /// Owners and the public.
    Owner,
    /// Staff running the auction.
    Auctioneer,
}

/// Player list tab.
///
/// Owners see `All`, `Unsold` and `Your`; auctioneers see `All` and `Sold`.
/// In the auctioneer view `All` means "still on the block", i.e. unsold players
/// only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    All,
    Unsold,
    Your,
    Sold,
}

impl Tab {
    /// Parse a tab name for `view`. A missing tab is `All`.
    pub fn parse(view: ListingView, raw: Option<&str>) -> ServiceResult<Self> {
        let raw = raw.map(str::trim).filter(|t| !t.is_empty());
        let Some(raw) = raw else {
            return Ok(Self::All);
        };

        match (view, raw.to_uppercase().as_str()) {
            (_, "ALL") => Ok(Self::All),
            (ListingView::Owner, "UNSOLD") => Ok(Self::Unsold),
            (ListingView::Owner, "YOUR") => Ok(Self::Your),
            (ListingView::Auctioneer, "SOLD") => Ok(Self::Sold),
            _ => Err(ServiceError::InvalidTab),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamFilter {
    Any,
    Unsold,
    Sold,
    Team(Uuid),
}

/// Which columns a search term is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope {
    Name,
    NamePhonePanchayat,
}

/// Fully resolved player filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerQuery {
    pub season_id: Uuid,
    pub active_only: bool,
    pub team: TeamFilter,
    /// Lower-cased, trimmed, never blank.
    pub search: Option<String>,
    pub scope: SearchScope,
}

impl PlayerQuery {
    /// Build the filter for a tab. The `Your` tab needs the viewer's team.
    pub fn for_tab(
        view: ListingView,
        tab: Tab,
        season_id: Uuid,
        viewer_team: Option<Uuid>,
        search: Option<&str>,
    ) -> ServiceResult<Self> {
        let team = match (view, tab) {
            (ListingView::Owner, Tab::All) => TeamFilter::Any,
            (ListingView::Owner, Tab::Unsold) | (ListingView::Auctioneer, Tab::All) => {
                TeamFilter::Unsold
            }
            (ListingView::Owner, Tab::Your) => {
                TeamFilter::Team(viewer_team.ok_or(ServiceError::NoActiveTeam)?)
            }
            (ListingView::Auctioneer, Tab::Sold) => TeamFilter::Sold,
            _ => return Err(ServiceError::InvalidTab),
        };

        let scope = match view {
            ListingView::Owner => SearchScope::Name,
            ListingView::Auctioneer => SearchScope::NamePhonePanchayat,
        };

        Ok(Self {
            season_id,
            active_only: true,
            team,
            search: search
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty()),
            scope,
        })
    }

    #[must_use]
    pub fn condition(&self) -> Condition {
        let mut cond = Condition::all().add(player::Column::SeasonId.eq(self.season_id));

        if self.active_only {
            cond = cond.add(player::Column::IsActive.eq(true));
        }

        cond = match self.team {
            TeamFilter::Any => cond,
            TeamFilter::Unsold => cond.add(player::Column::TeamId.is_null()),
            TeamFilter::Sold => cond.add(player::Column::TeamId.is_not_null()),
            TeamFilter::Team(id) => cond.add(player::Column::TeamId.eq(id)),
        };

        if let Some(term) = &self.search {
            let pattern = format!("%{}%", escape_like(term));
            let columns: &[player::Column] = match self.scope {
                SearchScope::Name => &[player::Column::Name],
                SearchScope::NamePhonePanchayat => &[
                    player::Column::Name,
                    player::Column::Phone,
                    player::Column::Panchayat,
                ],
            };
            let any = columns.iter().fold(Condition::any(), |acc, col| {
                acc.add(
                    Expr::expr(Func::lower(Expr::col((player::Entity, *col))))
                        .like(LikeExpr::new(pattern.as_str()).escape(LIKE_ESCAPE)),
                )
            });
            cond = cond.add(any);
        }

        cond
    }
}

const LIKE_ESCAPE: char = '\\';

/// Make `term` match literally inside a `LIKE` pattern.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

/// Inputs to a listing, before season resolution.
#[derive(Debug, Clone)]
pub struct ListingRequest {
    pub view: ListingView,
    pub tab: Tab,
    /// Defaults to the current season.
    pub season_id: Option<Uuid>,
    pub viewer_team: Option<Uuid>,
    pub search: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PlayerListing {
    pub players: Vec<player::Model>,
    pub is_auction_over: bool,
    /// Set on the `Your` tab when the team has bought nobody yet.
    pub no_players_bought: bool,
}

pub struct ListingService;

impl ListingService {
    pub async fn list(
        db: &DatabaseConnection,
        req: ListingRequest,
        now: DateTime<Utc>,
    ) -> ServiceResult<PlayerListing> {
        let season = SeasonService::resolve(db, req.season_id).await?;
        let is_auction_over = season.is_auction_over(now);

        // Unsold players stay hidden from owners until the auction has happened
        if req.view == ListingView::Owner && req.tab == Tab::Unsold && !is_auction_over {
            return Ok(PlayerListing {
                players: Vec::new(),
                is_auction_over,
                no_players_bought: false,
            });
        }

        let query = PlayerQuery::for_tab(
            req.view,
            req.tab,
            season.id,
            req.viewer_team,
            req.search.as_deref(),
        )?;

        let players = player::Entity::find()
            .filter(query.condition())
            .order_by_asc(player::Column::Name)
            .all(db)
            .await?;

        Ok(PlayerListing {
            no_players_bought: req.tab == Tab::Your && players.is_empty(),
            players,
            is_auction_over,
        })
    }
}
