pub mod comment;
pub mod images;
pub mod photos;
pub mod upload;

pub use comment::{add_comment, AddCommentInput};
pub use images::open_image;
pub use photos::{photos_of_user, CommentOutput, DisplayComment, PhotoOutput};
pub use upload::upload_image;
