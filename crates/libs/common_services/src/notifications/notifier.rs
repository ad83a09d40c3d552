use crate::database::album::AlbumRole;
use crate::notifications::{Mailer, OutgoingEmail};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InviteKind {
    Album,
    Family,
}

/// A request to tell someone they were invited. Produced after the invite row is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteNotification {
    pub kind: InviteKind,
    pub to: String,
    /// Album name, or "<owner>'s Family Album" for family invites.
    pub subject_name: String,
    pub invite_link: String,
    pub role: AlbumRole,
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

impl InviteNotification {
    #[must_use]
    pub fn render(&self, from: &str) -> OutgoingEmail {
        let action = match self.role {
            AlbumRole::Viewer => "view",
            AlbumRole::Contributor | AlbumRole::Owner => "view and upload photos to",
        };
        let name = &self.subject_name;
        let link = &self.invite_link;
        let html_name = escape_html(name);
        let html_link = escape_html(link);
        let expiry_note = match self.kind {
            InviteKind::Album => "This invite expires in 7 days. ",
            InviteKind::Family => "",
        };

        OutgoingEmail {
            from: from.to_owned(),
            to: self.to.clone(),
            subject: format!("You've been invited to \"{name}\""),
            text: format!(
                "You've been invited to {action} the album \"{name}\" on Family Album.\n\n\
                 Click the link below to accept your invitation:\n{link}\n\n\
                 {expiry_note}If you were not expecting this invite, you can ignore this email.\n"
            ),
            html: format!(
                "<div style=\"font-family:sans-serif;max-width:480px;margin:auto;padding:32px\">\
                 <h2 style=\"color:#111\">You've been invited</h2>\
                 <p>You've been invited to {action} the album <strong>\"{html_name}\"</strong> on Family Album.</p>\
                 <p style=\"margin:32px 0\"><a href=\"{html_link}\" style=\"background:#7c3aed;color:white;\
                 padding:14px 28px;border-radius:9999px;text-decoration:none;font-weight:600\">Accept Invite</a></p>\
                 <p style=\"color:#6b7280;font-size:13px\">{expiry_note}If you were not expecting this, \
                 you can ignore this email.</p></div>"
            ),
        }
    }
}

/// Producer side of the notification queue.
///
/// Enqueueing never fails the caller: a closed queue is logged and the message dropped.
#[derive(Clone, Debug)]
pub struct Notifier {
    sender: mpsc::UnboundedSender<InviteNotification>,
}

impl Notifier {
    /// Spawns the delivery worker. It runs until every `Notifier` clone is dropped.
    pub fn start(mailer: Arc<dyn Mailer>, from: String) -> (Self, JoinHandle<()>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let handle = tokio::spawn(run_notification_worker(mailer, from, receiver));
        (Self { sender }, handle)
    }

    pub fn enqueue(&self, notification: InviteNotification) {
        if let Err(e) = self.sender.send(notification) {
            warn!(
                "Notification queue closed, dropping invite email to {}",
                e.0.to
            );
        }
    }
}

async fn run_notification_worker(
    mailer: Arc<dyn Mailer>,
    from: String,
    mut receiver: mpsc::UnboundedReceiver<InviteNotification>,
) {
    while let Some(notification) = receiver.recv().await {
        let email = notification.render(&from);
        match mailer.deliver(&email).await {
            Ok(()) => info!("📧 Sent {:?} invite email to {}", notification.kind, email.to),
            Err(e) => warn!(
                "Email send failed (invite still created) for {}: {}",
                email.to, e
            ),
        }
    }
    info!("Notification worker stopped.");
}
