//! Post (submission) operations.

use featurebase_domain::{
    InputField, InputKind, OperationDefinition, ShapingRule, TransportCall,
};

pub const LIST_POSTS: &str = "list_posts";
pub const CREATE_POST: &str = "create_post";
pub const UPDATE_POST: &str = "update_post";
pub const DELETE_POST: &str = "delete_post";
pub const GET_POST_UPVOTERS: &str = "get_post_upvoters";
pub const ADD_UPVOTER: &str = "add_upvoter";
pub const RESOLVE_POST_SLUG: &str = "resolve_post_slug";
pub const GET_SIMILAR_SUBMISSIONS: &str = "get_similar_submissions";

const POST_FIELDS: &str = "id, title, content, author, authorId, authorPicture, commentsAllowed, \
    organization, upvotes, upvoted, postCategory(category,private,prefill,roles,hiddenFromRoles,id), \
    postTags(name,color,private,id), postStatus(name,color,type,isDefault,id), date, lastModified, \
    comments, isSubscribed, inReview, lastDraggedTimestamps";

/// Fields kept for each upvoter.
const UPVOTER_PROJECTION: &str = "userId,organizationId,companies(id,name),email,name";

fn string_array(name: &str, description: &str) -> InputField {
    InputField::optional(name, description).with_kind(InputKind::StringArray)
}

fn number(name: &str, description: &str) -> InputField {
    InputField::optional(name, description).with_kind(InputKind::Number)
}

fn boolean(name: &str, description: &str) -> InputField {
    InputField::optional(name, description).with_kind(InputKind::Boolean)
}

fn custom_inputs() -> InputField {
    InputField::optional("customInputValues", "Custom field values").with_kind(InputKind::Object)
}

pub fn list_posts() -> OperationDefinition {
    OperationDefinition::new(
        LIST_POSTS,
        format!("List posts with optional filtering. Available fields: {}", POST_FIELDS),
        TransportCall::get("/posts"),
    )
    .with_input(InputField::optional("id", "Find submission by its id"))
    .with_input(InputField::optional("q", "Search for posts by title or content"))
    .with_input(string_array("category", "Filter posts by category (board) names"))
    .with_input(string_array("status", "Filter posts by status ids"))
    .with_input(InputField::optional(
        "sortBy",
        "Sort posts (e.g., \"date:desc\" or \"upvotes:desc\")",
    ))
    .with_input(InputField::optional("startDate", "Get posts created after this date"))
    .with_input(InputField::optional("endDate", "Get posts created before this date"))
    .with_input(number("limit", "Number of results per page"))
    .with_input(number("page", "Page number"))
    .with_projection_input(
        "select",
        "Fields to return. Examples: \"id,title,upvotes\" | \"title,author(name)\" | \
         \"postCategory(category),postStatus(name)\". Leave empty for all fields.",
    )
    .with_shaping(ShapingRule::Passthrough)
}

pub fn create_post() -> OperationDefinition {
    OperationDefinition::new(CREATE_POST, "Create a new post", TransportCall::post("/posts"))
        .with_input(InputField::required("title", "Post title (min 2 characters)"))
        .with_input(InputField::required("category", "The board (category) for the post"))
        .with_input(InputField::optional("content", "Post content (can be empty)"))
        .with_input(InputField::optional("email", "Email of the user submitting"))
        .with_input(InputField::optional("authorName", "Name for new user if email not found"))
        .with_input(string_array("tags", "Array of tag names"))
        .with_input(boolean("commentsAllowed", "Allow comments on post"))
        .with_input(InputField::optional("status", "Post status"))
        .with_input(InputField::optional("date", "Post creation date"))
        .with_input(custom_inputs())
        .with_shaping(ShapingRule::minimal_create("submission"))
}

pub fn update_post() -> OperationDefinition {
    OperationDefinition::new(UPDATE_POST, "Update an existing post", TransportCall::patch("/posts"))
        .with_input(InputField::required("id", "Post ID to update"))
        .with_input(InputField::optional("title", "New title"))
        .with_input(InputField::optional("content", "New content"))
        .with_input(InputField::optional("status", "New status"))
        .with_input(boolean("commentsAllowed", "Allow comments"))
        .with_input(InputField::optional("category", "New category"))
        .with_input(boolean("sendStatusUpdateEmail", "Send status update email to upvoters"))
        .with_input(string_array("tags", "New tags"))
        .with_input(boolean("inReview", "Put post in review"))
        .with_input(InputField::optional("date", "Post creation date"))
        .with_input(custom_inputs())
}

pub fn delete_post() -> OperationDefinition {
    OperationDefinition::new(
        DELETE_POST,
        "Delete a post permanently",
        TransportCall::delete("/posts"),
    )
    .with_input(InputField::required("id", "Post ID to delete"))
}

pub fn get_post_upvoters() -> OperationDefinition {
    OperationDefinition::new(
        GET_POST_UPVOTERS,
        "Get list of users who upvoted a post",
        TransportCall::get("/posts/upvoters"),
    )
    .with_input(InputField::required("submissionId", "Post ID"))
    .with_input(number("page", "Page number (default: 1)").with_default(1))
    .with_input(number("limit", "Results per page (default: 10, max: 100)").with_default(10))
    .with_shaping(ShapingRule::paginated_projection(UPVOTER_PROJECTION))
}

pub fn add_upvoter() -> OperationDefinition {
    OperationDefinition::new(
        ADD_UPVOTER,
        "Add an upvoter to a post",
        TransportCall::post("/posts/upvoters"),
    )
    .with_input(InputField::required("id", "Post ID"))
    .with_input(InputField::required("email", "Upvoter email"))
    .with_input(InputField::required("name", "Upvoter name"))
}

pub fn resolve_post_slug() -> OperationDefinition {
    OperationDefinition::new(
        RESOLVE_POST_SLUG,
        "Convert a post slug to post ID and get post details",
        TransportCall::get("/api/v1/submission").on_public_origin(),
    )
    .with_input(InputField::required(
        "slug",
        "Post slug from URL (e.g., 'spacectl-stack-local-preview-target')",
    ))
}

pub fn get_similar_submissions() -> OperationDefinition {
    OperationDefinition::new(
        GET_SIMILAR_SUBMISSIONS,
        "Find posts similar to the given query text",
        TransportCall::get("/api/v1/submission/getSimilarSubmissions").on_public_origin(),
    )
    .with_input(InputField::required("query", "Search query text to find similar submissions"))
    .with_input(
        InputField::optional("locale", "Locale for search (default: 'en')").with_default("en"),
    )
}
