//! Changelog and subscriber operations.

use featurebase_domain::{
    InputField, InputKind, OperationDefinition, ShapingRule, TransportCall,
};

pub const LIST_CHANGELOGS: &str = "list_changelogs";
pub const CREATE_CHANGELOG: &str = "create_changelog";
pub const UPDATE_CHANGELOG: &str = "update_changelog";
pub const DELETE_CHANGELOG: &str = "delete_changelog";
pub const GET_CHANGELOG_SUBSCRIBERS: &str = "get_changelog_subscribers";
pub const ADD_CHANGELOG_SUBSCRIBER: &str = "add_changelog_subscriber";
pub const REMOVE_CHANGELOG_SUBSCRIBER: &str = "remove_changelog_subscriber";

fn state(description: &str) -> InputField {
    InputField::optional("state", description).with_kind(InputKind::one_of(["draft", "live"]))
}

fn categories(description: &str) -> InputField {
    InputField::optional("categories", description).with_kind(InputKind::StringArray)
}

pub fn list_changelogs() -> OperationDefinition {
    OperationDefinition::new(
        LIST_CHANGELOGS,
        "List changelogs with optional filtering",
        TransportCall::get("/changelog"),
    )
    .with_input(InputField::optional("id", "Find changelog by its ID"))
    .with_input(InputField::optional("q", "Search for changelogs by title or content"))
    .with_input(
        InputField::optional("category", "Filter changelogs by category names")
            .with_kind(InputKind::StringArray),
    )
    .with_input(state("Filter by state (draft or live)"))
    .with_input(
        InputField::optional("limit", "Number of results per page (max: 100)")
            .with_kind(InputKind::Number),
    )
    .with_input(InputField::optional("page", "Page number").with_kind(InputKind::Number))
    .with_projection_input(
        "select",
        "Fields to return. Examples: \"id,title\" | \"title,state,categories\". \
         Leave empty for all fields.",
    )
    .with_shaping(ShapingRule::Passthrough)
}

pub fn create_changelog() -> OperationDefinition {
    OperationDefinition::new(
        CREATE_CHANGELOG,
        "Create a new changelog entry",
        TransportCall::post("/changelog"),
    )
    .with_input(InputField::required("title", "Changelog title"))
    .with_input(InputField::optional(
        "htmlContent",
        "HTML content of the changelog (use this OR markdownContent)",
    ))
    .with_input(InputField::optional(
        "markdownContent",
        "Markdown content of the changelog (use this OR htmlContent)",
    ))
    .with_input(categories("Array of category identifiers"))
    .with_shaping(ShapingRule::minimal_create("changelog"))
}

pub fn update_changelog() -> OperationDefinition {
    OperationDefinition::new(
        UPDATE_CHANGELOG,
        "Update an existing changelog",
        TransportCall::patch("/changelog"),
    )
    .with_input(InputField::required("id", "Changelog ID to update"))
    .with_input(InputField::optional("title", "New title"))
    .with_input(InputField::optional("htmlContent", "New HTML content"))
    .with_input(InputField::optional("markdownContent", "New markdown content"))
    .with_input(categories("New categories"))
    .with_input(state("Change state to draft or live"))
}

pub fn delete_changelog() -> OperationDefinition {
    OperationDefinition::new(
        DELETE_CHANGELOG,
        "Delete a changelog permanently",
        TransportCall::delete("/changelog"),
    )
    .with_input(InputField::required("id", "Changelog ID to delete"))
}

pub fn get_changelog_subscribers() -> OperationDefinition {
    OperationDefinition::new(
        GET_CHANGELOG_SUBSCRIBERS,
        "Get list of changelog subscribers",
        TransportCall::get("/changelog/subscribers"),
    )
    .with_input(
        InputField::optional("limit", "Results per page (default: 10, max: 100)")
            .with_kind(InputKind::Number)
            .with_default(10),
    )
    .with_input(
        InputField::optional("page", "Page number (default: 1)")
            .with_kind(InputKind::Number)
            .with_default(1),
    )
}

pub fn add_changelog_subscriber() -> OperationDefinition {
    OperationDefinition::new(
        ADD_CHANGELOG_SUBSCRIBER,
        "Add a subscriber to changelog updates",
        TransportCall::post("/changelog/subscribers"),
    )
    .with_input(InputField::required("email", "Subscriber email"))
    .with_input(InputField::required("name", "Subscriber name"))
}

pub fn remove_changelog_subscriber() -> OperationDefinition {
    OperationDefinition::new(
        REMOVE_CHANGELOG_SUBSCRIBER,
        "Remove a subscriber from changelog updates",
        TransportCall::delete("/changelog/subscribers"),
    )
    .with_input(InputField::required("email", "Subscriber email to remove"))
}
