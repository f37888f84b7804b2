//! Featurebase operation catalogue
//!
//! The declarative table of every tool this server exposes: declared inputs,
//! the HTTP call each makes and how the response is shaped.
//!
//! ## Groups
//!
//! - `posts`: submissions, upvoters, slug resolution, similarity search
//! - `comments`: comments and replies on posts or changelogs
//! - `changelogs`: changelog entries and their subscribers

pub mod changelogs;
pub mod comments;
pub mod posts;

use featurebase_domain::OperationCatalogue;

/// Create the catalogue with every available operation
pub fn default_catalogue() -> OperationCatalogue {
    OperationCatalogue::new()
        .register(posts::list_posts())
        .register(posts::create_post())
        .register(posts::update_post())
        .register(posts::delete_post())
        .register(posts::get_post_upvoters())
        .register(posts::add_upvoter())
        .register(posts::resolve_post_slug())
        .register(posts::get_similar_submissions())
        .register(comments::get_comments())
        .register(comments::create_comment())
        .register(comments::update_comment())
        .register(comments::delete_comment())
        .register(changelogs::list_changelogs())
        .register(changelogs::create_changelog())
        .register(changelogs::update_changelog())
        .register(changelogs::delete_changelog())
        .register(changelogs::get_changelog_subscribers())
        .register(changelogs::add_changelog_subscriber())
        .register(changelogs::remove_changelog_subscriber())
}
