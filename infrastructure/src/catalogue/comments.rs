//! Comment operations.

use featurebase_domain::{
    InputField, InputKind, OperationDefinition, ShapingRule, TransportCall,
};

pub const GET_COMMENTS: &str = "get_comments";
pub const CREATE_COMMENT: &str = "create_comment";
pub const UPDATE_COMMENT: &str = "update_comment";
pub const DELETE_COMMENT: &str = "delete_comment";

const COMMENT_FIELDS: &str = "upvoted, downvoted, inReview, isSpam, pinned, emailSent, \
    sendNotification, organization, submission, author, authorId, authorPicture, isPrivate, \
    isDeleted, confidenceScore, content, upvotes, downvotes, score, parentComment, path, \
    createdAt, updatedAt, id";

fn boolean(name: &str, description: &str) -> InputField {
    InputField::optional(name, description).with_kind(InputKind::Boolean)
}

fn target_inputs(operation: OperationDefinition) -> OperationDefinition {
    operation
        .with_input(InputField::optional(
            "submissionId",
            "Post ID or slug (required if no changelogId)",
        ))
        .with_input(InputField::optional(
            "changelogId",
            "Changelog ID or slug (required if no submissionId)",
        ))
}

pub fn get_comments() -> OperationDefinition {
    target_inputs(OperationDefinition::new(
        GET_COMMENTS,
        format!(
            "Get comments for a post or changelog. Available fields: {}, replies({})",
            COMMENT_FIELDS, COMMENT_FIELDS
        ),
        TransportCall::get("/comment"),
    ))
    .with_input(
        InputField::optional("privacy", "Filter by privacy setting")
            .with_kind(InputKind::one_of(["public", "private", "all"])),
    )
    .with_input(boolean("inReview", "Filter for comments in review"))
    .with_input(InputField::optional("commentThreadId", "Get all comments in a thread"))
    .with_input(
        InputField::optional("limit", "Results per page (default: 10)")
            .with_kind(InputKind::Number),
    )
    .with_input(
        InputField::optional("page", "Page number (default: 1)").with_kind(InputKind::Number),
    )
    .with_input(
        InputField::optional("sortBy", "Sort order (default: best)")
            .with_kind(InputKind::one_of(["best", "top", "new", "old"])),
    )
    .with_projection_input(
        "select",
        "Fields to return. Examples: \"id,content,author(name)\" | \"content,upvotes,createdAt\" | \
         \"author(name,email),replies(content)\". Leave empty for all fields.",
    )
    .with_shaping(ShapingRule::Passthrough)
}

pub fn create_comment() -> OperationDefinition {
    target_inputs(OperationDefinition::new(
        CREATE_COMMENT,
        "Create a new comment or reply",
        TransportCall::post("/comment"),
    ))
    .with_input(InputField::required("content", "Comment content"))
    .with_input(InputField::optional("parentCommentId", "Parent comment ID for replies"))
    .with_input(boolean("isPrivate", "Make comment private (admins only)"))
    .with_input(boolean("sendNotification", "Notify voters (default: true)"))
    .with_input(InputField::optional("createdAt", "Set creation date"))
    .with_input(
        InputField::optional(
            "author",
            "Post as specific user: { name, email, profilePicture }",
        )
        .with_kind(InputKind::Object),
    )
    .with_shaping(ShapingRule::minimal_create("comment"))
}

pub fn update_comment() -> OperationDefinition {
    OperationDefinition::new(
        UPDATE_COMMENT,
        "Update an existing comment",
        TransportCall::patch("/comment"),
    )
    .with_input(InputField::required("id", "Comment ID"))
    .with_input(InputField::optional("content", "New content"))
    .with_input(boolean("isPrivate", "Make private (admins only)"))
    .with_input(boolean("pinned", "Pin comment to top"))
    .with_input(boolean("inReview", "Put comment in review"))
    .with_input(InputField::optional("createdAt", "Update creation date"))
}

pub fn delete_comment() -> OperationDefinition {
    OperationDefinition::new(
        DELETE_COMMENT,
        "Delete a comment (soft delete if has replies)",
        TransportCall::delete("/comment"),
    )
    .with_input(InputField::required("id", "Comment ID to delete"))
}
