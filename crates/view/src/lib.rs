pub mod card;
pub mod embed;
pub mod history;
pub mod loading;
pub mod plan;
pub mod state;

pub use history::HistoryPayload;
pub use loading::LoadingLatch;
pub use plan::{RegionPicker, RenderPlan, render_plan};
pub use state::{MapMode, ViewState};
