mod mailer;
mod notifier;

pub use mailer::*;
pub use notifier::*;
