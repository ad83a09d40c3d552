use super::interfaces::{FamilyInvitePreview, FamilyInviteRequest, FamilyMemberResponse};
use crate::api::album::error::AlbumError;
use crate::context::SharingContext;
use crate::database::FamilyStore;
use crate::database::album::AlbumRole;
use crate::database::family_member::{FamilyMember, FamilyStatus};
use crate::notifications::{InviteKind, InviteNotification};
use crate::utils::nice_id;
use tracing::{info, instrument};
use uuid::Uuid;

async fn member_response(context: &SharingContext, member: FamilyMember) -> FamilyMemberResponse {
    let email = match &member.member_id {
        Some(member_id) => context.directory.email_of(member_id).await,
        None => None,
    };
    let link = context.settings.family_invite_link(&member.token);
    FamilyMemberResponse::new(member, email, link)
}

async fn find_owned(
    context: &SharingContext,
    owner_id: &str,
    record_id: Uuid,
) -> Result<FamilyMember, AlbumError> {
    FamilyStore::find_owned(context.db(), record_id, owner_id)
        .await?
        .ok_or_else(|| AlbumError::NotFound(format!("Family member {record_id} not found")))
}

/// Every family record the owner has issued, newest first.
#[instrument(skip(context))]
pub async fn list_family_members(
    context: &SharingContext,
    owner_id: &str,
) -> Result<Vec<FamilyMemberResponse>, AlbumError> {
    let members = FamilyStore::list_by_owner(context.db(), owner_id).await?;
    let mut responses = Vec::with_capacity(members.len());
    for member in members {
        responses.push(member_response(context, member).await);
    }
    Ok(responses)
}

/// Invites an email into the owner's family. Once accepted, the member holds `role` on every
/// album of the owner, including albums created later.
#[instrument(skip(context))]
pub async fn invite_family_member(
    context: &SharingContext,
    owner_id: &str,
    request: FamilyInviteRequest,
) -> Result<FamilyMemberResponse, AlbumError> {
    let role = request.role.ensure_grantable()?;
    let email = context.settings.normalize_email(&request.email);
    if email.trim().is_empty() {
        return Err(AlbumError::InvalidArgument("email is empty".to_owned()));
    }

    let member = FamilyStore::create(
        context.db(),
        &FamilyMember {
            id: Uuid::new_v4(),
            owner_id: owner_id.to_owned(),
            invited_email: email,
            member_id: None,
            role,
            status: FamilyStatus::Pending,
            token: nice_id(context.settings.invite_token_length),
            created_at: context.now(),
        },
    )
    .await?;
    info!("Created family invite {} from {} as '{}'", member.id, owner_id, role);

    let owner_email = context.directory.email_of(owner_id).await;
    let response = member_response(context, member).await;
    context.notifier.enqueue(InviteNotification {
        kind: InviteKind::Family,
        to: response.invited_email.clone(),
        subject_name: format!(
            "{}'s Family Album",
            owner_email.as_deref().unwrap_or("Someone")
        ),
        invite_link: response.invite_link.clone(),
        role,
    });
    Ok(response)
}

#[instrument(skip(context))]
pub async fn update_family_member_role(
    context: &SharingContext,
    owner_id: &str,
    record_id: Uuid,
    role: AlbumRole,
) -> Result<FamilyMemberResponse, AlbumError> {
    let role = role.ensure_grantable()?;
    find_owned(context, owner_id, record_id).await?;

    let member = FamilyStore::update_role(context.db(), record_id, role)
        .await?
        .ok_or_else(|| AlbumError::NotFound(format!("Family member {record_id} not found")))?;
    info!("Family member {} of {} is now '{}'", record_id, owner_id, role);
    Ok(member_response(context, member).await)
}

/// Deletes the record, ending the member's access to every album of the owner at once.
#[instrument(skip(context))]
pub async fn remove_family_member(
    context: &SharingContext,
    owner_id: &str,
    record_id: Uuid,
) -> Result<(), AlbumError> {
    find_owned(context, owner_id, record_id).await?;
    FamilyStore::delete(context.db(), record_id).await?;
    info!("Removed family member {} of {}", record_id, owner_id);
    Ok(())
}

#[instrument(skip(context, token))]
pub async fn preview_family_invite(
    context: &SharingContext,
    token: &str,
) -> Result<FamilyInvitePreview, AlbumError> {
    let member = FamilyStore::find_by_token(context.db(), token)
        .await?
        .ok_or_else(|| AlbumError::NotFound("Family invite not found".to_owned()))?;

    let owner_name = context
        .directory
        .email_of(&member.owner_id)
        .await
        .unwrap_or_else(|| "A family member".to_owned());
    Ok(FamilyInvitePreview {
        owner_name,
        role: member.role,
        status: member.status,
    })
}

/// Redeems a family invite token for the caller. Accepting twice returns the current row.
#[instrument(skip(context, token))]
pub async fn accept_family_invite(
    context: &SharingContext,
    user_id: &str,
    token: &str,
) -> Result<FamilyMember, AlbumError> {
    let member = FamilyStore::find_by_token(context.db(), token)
        .await?
        .ok_or_else(|| AlbumError::NotFound("Family invite not found".to_owned()))?;

    match member.status {
        FamilyStatus::Revoked => Err(AlbumError::Revoked(format!("family invite {}", member.id))),
        FamilyStatus::Accepted => Ok(member),
        FamilyStatus::Pending if member.owner_id == user_id => Err(AlbumError::InvalidArgument(
            "cannot join your own family".to_owned(),
        )),
        FamilyStatus::Pending => {
            let accepted = FamilyStore::accept(context.db(), member.id, user_id)
                .await?
                .ok_or_else(|| {
                    AlbumError::NotFound(format!("Family invite {} not found", member.id))
                })?;
            info!("{} joined the family of {}", user_id, accepted.owner_id);
            Ok(accepted)
        }
    }
}
