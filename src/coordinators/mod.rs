// Coordinators layer - Workflow orchestration
//
// Coordinators compose stores and providers into the workflows behind each
// endpoint and CLI command.

pub mod account_coordinator;
pub mod login_coordinator;
pub mod transfer_coordinator;

pub use account_coordinator::AccountCoordinator;
pub use login_coordinator::LoginCoordinator;
pub use transfer_coordinator::{TransferCoordinator, TransferReceipt};
