mod app;
mod message;
mod state;

pub use app::SkinScanApp;
pub use message::Message;
pub use state::AppState;

use crate::detection::model::ModelPaths;

/// Launch the single-page app.
pub fn run(paths: ModelPaths) -> iced::Result {
    iced::application(
        "SkinScan - Skin Detection & Analysis",
        SkinScanApp::update,
        SkinScanApp::view,
    )
    .theme(SkinScanApp::theme)
    .run_with(move || SkinScanApp::new(paths.clone()))
}
