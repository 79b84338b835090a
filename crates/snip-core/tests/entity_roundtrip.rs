//! Deserialization of representative platform payloads.

use pretty_assertions::assert_eq;
use snip_core::entities::{Paginated, PackageRef, Snippet, Tag, User};

const LISTING: &str = r#"{
    "data": [
        {
            "id": "s1",
            "title": "Circle grid",
            "description": null,
            "tags": [{ "id": "t1", "name": "math", "numberOfSnippets": 12 }],
            "image": "https://cdn.example/s1.png",
            "author": null,
            "createdBy": { "id": "u1", "username": "alice" },
            "packages": [{ "namespace": "preview", "name": "cetz", "version": "0.3.1" }],
            "createdAt": "2025-03-01T10:00:00.000Z",
            "updatedAt": "2025-03-02T10:00:00.000Z",
            "isUpvoted": false,
            "numberOfUpvotes": 4,
            "versions": [
                {
                    "version": "0.13.0",
                    "success": true,
                    "deletedAt": null,
                    "createdAt": "2025-03-01T10:00:00.000Z",
                    "updatedAt": "2025-03-01T10:00:00.000Z"
                }
            ]
        }
    ],
    "meta": { "total": 21, "perPage": 10, "currentPage": 1, "lastPage": 3, "firstPage": 1 }
}"#;

#[test]
fn snippet_listing_deserializes() {
    let page: Paginated<Snippet> = serde_json::from_str(LISTING).unwrap();
    assert_eq!(page.meta.last_page, 3);
    assert_eq!(page.data.len(), 1);

    let snippet = &page.data[0];
    assert_eq!(snippet.created_by.username, "alice");
    assert_eq!(snippet.tags[0].number_of_snippets, Some(12));
    assert_eq!(snippet.packages[0].version, "0.3.1");
    assert_eq!(snippet.number_of_upvotes, Some(4));
    assert!(snippet.versions[0].success);
}

#[test]
fn minimal_meta_defaults_first_page() {
    let page: Paginated<PackageRef> = serde_json::from_str(
        r#"{ "data": [{ "namespace": "core", "name": "shapes" }],
             "meta": { "currentPage": 2, "lastPage": 2 } }"#,
    )
    .unwrap();
    assert_eq!(page.meta.first_page, 1);
    assert_eq!(page.data[0].qualified_name(), "core/shapes");
}

#[test]
fn tag_and_user_omit_absent_optionals() {
    let tag = Tag {
        id: "t1".into(),
        name: "math".into(),
        description: None,
        number_of_snippets: None,
    };
    assert_eq!(
        serde_json::to_value(&tag).unwrap(),
        serde_json::json!({ "id": "t1", "name": "math" })
    );

    let user: User =
        serde_json::from_str(r#"{ "id": "u1", "username": "alice", "isPrivileged": true }"#)
            .unwrap();
    assert_eq!(user.is_privileged, Some(true));
    assert!(user.email.is_none());
}
