use chrono::{DateTime, Utc};
use log::warn;
use serde::Serialize;

use crate::{
    app_data::AppData,
    app_error::AppError,
    mongo::withid::{Id, WithId},
    stores::{Comment, Photo, UserSummary},
};

/// A photo as returned to clients, generic over the comment shape.
#[derive(Serialize, Debug)]
pub struct PhotoOutput<C> {
    #[serde(rename = "_id")]
    pub id: String,
    pub file_name: String,
    pub date_time: DateTime<Utc>,
    pub user_id: String,
    pub comments: Vec<C>,
}

impl<C> PhotoOutput<C> {
    fn with_comments(id: Id, photo: &Photo, comments: Vec<C>) -> Self {
        Self {
            id: id.to_hex(),
            file_name: photo.file_name.clone(),
            date_time: photo.date_time,
            user_id: photo.user_id.to_hex(),
            comments,
        }
    }
}

impl From<WithId<Photo>> for PhotoOutput<CommentOutput> {
    fn from((id, photo): WithId<Photo>) -> Self {
        let comments = photo
            .comments
            .iter()
            .cloned()
            .map(CommentOutput::from)
            .collect();
        Self::with_comments(id, &photo, comments)
    }
}

/// Stored comment with its raw author id.
#[derive(Serialize, Debug, PartialEq)]
pub struct CommentOutput {
    pub date_time: String,
    pub comment: String,
    pub user_id: String,
}

impl From<Comment> for CommentOutput {
    fn from(comment: Comment) -> Self {
        Self {
            date_time: comment.date_time,
            comment: comment.comment,
            user_id: comment.user_id.to_hex(),
        }
    }
}

/// Comment with its author resolved; `user` is `None` once the author is gone.
#[derive(Serialize, Debug, PartialEq)]
pub struct DisplayComment {
    pub date_time: String,
    pub comment: String,
    pub user: Option<UserSummary>,
}

impl DisplayComment {
    pub fn new(comment: Comment, user: Option<UserSummary>) -> Self {
        Self {
            date_time: comment.date_time,
            comment: comment.comment,
            user,
        }
    }
}

pub async fn photos_of_user(
    user_id: &str,
    data: &AppData,
) -> Result<Vec<PhotoOutput<DisplayComment>>, AppError> {
    let user_id = Id::parse_str(user_id).map_err(|err| {
        warn!(target: "photoroll", "malformed user id {:?}: {}", user_id, err);
        AppError::InvalidUserId
    })?;
    let photos = data.photos.find_by_user(&user_id).await.map_err(|err| {
        warn!(target: "photoroll", "listing photos of {} failed: {:#}", user_id, err);
        AppError::InvalidUserId
    })?;
    if photos.is_empty() {
        return Err(AppError::NoPhotos);
    }

    let mut output = Vec::with_capacity(photos.len());
    for (id, mut photo) in photos {
        let stored = std::mem::take(&mut photo.comments);
        let mut comments = Vec::with_capacity(stored.len());
        for comment in stored {
            let author = comment.user_id;
            let user = data.users.summary(&author).await.map_err(|err| {
                warn!(target: "photoroll", "resolving author {} failed: {:#}", author, err);
                AppError::InvalidUserId
            })?;
            comments.push(DisplayComment::new(comment, user));
        }
        output.push(PhotoOutput::with_comments(id, &photo, comments));
    }
    Ok(output)
}
