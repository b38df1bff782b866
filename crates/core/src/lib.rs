pub mod client;
pub mod config;
pub mod navigator;
pub mod session;
pub mod testing;
pub mod view;

pub use client::{
    ClientError, Endpoint, FeedbackSubmission, HttpRecipeClient, LeaderboardEntry, Query,
    RecipeDetail, RecipeId, RecipeService, RecipeSummary, RequestError,
};
pub use config::{
    load_config, load_config_from_str, load_config_or_default, validate_config, Config,
    ConfigError, FeedbackConfig, ServiceConfig,
};
pub use navigator::{ActiveSession, NavigationError, Navigator, View};
pub use session::{
    FeedbackState, FeedbackWorkflow, LeaderboardSession, LoadStatus, RecipeDetailSession,
    Redirector, SearchSession, SearchStatus, SessionEvent, SessionId,
};
