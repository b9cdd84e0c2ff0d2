//! TUI widgets.

mod auth_form;
mod dashboard;
mod help;
mod location_bar;
mod not_found;
mod notifications;
mod order_table;
mod status_bar;
mod text_field;
mod withdrawal_table;

pub use auth_form::AuthFormView;
pub use dashboard::DashboardView;
pub use help::HelpPanel;
pub use location_bar::LocationBar;
pub use not_found::NotFoundView;
pub use order_table::OrderTable;
pub use status_bar::StatusBar;
pub use text_field::TextField;
pub use withdrawal_table::WithdrawalTable;
