use serde::Deserialize;

use crate::{
    app_data::AppData,
    app_error::AppError,
    mongo::withid::Id,
    services::photos::{CommentOutput, PhotoOutput},
    stores::Comment,
};

#[derive(Deserialize, Debug)]
pub struct AddCommentInput {
    pub comment: String,
    pub user_id: String,
}

/// Appends a comment to the photo and returns the stored document, author
/// ids left unresolved.
pub async fn add_comment(
    photo_id: &str,
    input: AddCommentInput,
    data: &AppData,
) -> Result<PhotoOutput<CommentOutput>, AppError> {
    let photo_id = Id::parse_str(photo_id).map_err(|_| AppError::PhotoNotFound)?;
    let user_id = Id::parse_str(&input.user_id).map_err(|_| AppError::InvalidUserId)?;
    let comment = Comment::new(input.comment, user_id);
    let updated = data
        .photos
        .push_comment(&photo_id, &comment)
        .await
        .map_err(AppError::comment_failed)?
        .ok_or(AppError::PhotoNotFound)?;
    Ok(updated.into())
}
