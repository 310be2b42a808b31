//! End-to-end marker flows over the in-memory host.

use std::sync::Arc;

use vttkit_adapters::{InMemoryHost, PlacedObject};
use vttkit_app::chat::Responder;
use vttkit_app::services::{CharacterResolver, CustodianService, MarkerService};
use vttkit_app::ScriptRouter;
use vttkit_domain::{GraphicObject, ObjectId, PageId, PathObject, PlayerId, Token};
use vttkit_ports::inbound::ChatMessage;

const CELL: f64 = 70.0;

fn build() -> (Arc<InMemoryHost>, ScriptRouter) {
    let host = Arc::new(InMemoryHost::new("page-1"));
    let responder = Responder::new(host.clone(), host.clone());
    let resolver = Arc::new(CharacterResolver::new(
        host.clone(),
        host.clone(),
        host.clone(),
        responder.clone(),
    ));
    let markers = Arc::new(MarkerService::new(
        host.clone(),
        host.clone(),
        host.clone(),
    ));
    let custodian = Arc::new(CustodianService::new(host.clone(), resolver, responder));
    let router = ScriptRouter::new(markers, custodian, host.clone());
    (host, router)
}

fn drawing(id: &str) -> PathObject {
    PathObject {
        id: ObjectId::new(id),
        left: 35.0,
        top: 35.0,
        width: 70.0,
        height: 70.0,
        path: r#"[["M",0.0,0.0],["L",70.0,70.0]]"#.to_string(),
    }
}

fn token(id: &str) -> Token {
    Token {
        id: ObjectId::new(id),
        page_id: PageId::new("page-1"),
        left: 350.0,
        top: 350.0,
        width: 70.0,
        height: 70.0,
        represents: None,
        status_markers: Vec::new(),
    }
}

fn message(content: &str, selected: &[&str]) -> ChatMessage {
    ChatMessage::api("Alice", PlayerId::new("p1"), content)
        .with_selected(selected.iter().map(|s| ObjectId::new(*s)))
}

/// Expected icon center for a 70x70 token at (350, 350) with no native
/// markers.
fn slot_position(slot: usize) -> (f64, f64) {
    let left = 350.0 + 35.0 - CELL / 6.0 - slot as f64 * CELL / 3.0;
    let top = 350.0 - 35.0 + CELL / 6.0;
    (left, top)
}

fn assert_close(actual: (f64, f64), expected: (f64, f64)) {
    assert!(
        (actual.0 - expected.0).abs() < 1e-9 && (actual.1 - expected.1).abs() < 1e-9,
        "position {actual:?} != {expected:?}"
    );
}

#[tokio::test]
async fn saving_then_listing_shows_the_name_once() {
    let (host, router) = build();
    host.seed_path(drawing("path-1"));

    router
        .handle_chat(&message("!saveMarker sleep", &["path-1"]))
        .await;
    router
        .handle_chat(&message("!saveMarker sleep", &["path-1"]))
        .await;
    router.handle_chat(&message("!listMarkers", &[])).await;

    let notes = host.handout_notes("SavedCustomStatusMarkers").unwrap();
    let store: serde_json::Value = serde_json::from_str(&notes).unwrap();
    let entries = store.as_object().unwrap();
    assert_eq!(entries.len(), 1);
    assert!(entries["sleep"].get("pathGeometry").is_some());

    let log = host.chat_log();
    assert!(log
        .iter()
        .any(|(_, line)| line == "Saved markers: <br/>sleep"));
    assert_eq!(
        log.iter()
            .filter(|(_, line)| line == "Created status sleep")
            .count(),
        2
    );
}

#[tokio::test]
async fn toggling_creates_then_removes_the_icon() {
    let (host, router) = build();
    host.seed_path(drawing("path-1"));
    host.seed_token(token("tok-1"));
    router
        .handle_chat(&message("!saveMarker sleep", &["path-1"]))
        .await;

    router
        .handle_chat(&message("!setMarker sleep", &["tok-1"]))
        .await;
    assert_eq!(host.placed_count(), 1);
    let (_, icon) = &host.placed_objects()[0];
    assert_close(icon.position(), slot_position(0));

    router
        .handle_chat(&message("!setMarker sleep", &["tok-1"]))
        .await;
    assert_eq!(host.placed_count(), 0);
}

#[tokio::test]
async fn adding_a_count_replaces_in_place_instead_of_stacking() {
    let (host, router) = build();
    host.seed_path(drawing("path-1"));
    host.seed_token(token("tok-1"));
    router
        .handle_chat(&message("!saveMarker sleep", &["path-1"]))
        .await;

    router
        .handle_chat(&message("!setMarker sleep", &["tok-1"]))
        .await;
    assert_eq!(host.placed_count(), 1);

    // Badge added: icon replaced at slot 0 plus a text badge
    router
        .handle_chat(&message("!setMarker sleep 3", &["tok-1"]))
        .await;
    let objects = host.placed_objects();
    assert_eq!(objects.len(), 2);

    let (expected_left, expected_top) = slot_position(0);
    let badge = objects
        .iter()
        .find_map(|(_, obj)| match obj {
            PlacedObject::Text(spec) => Some(spec.clone()),
            _ => None,
        })
        .expect("badge text object");
    assert_eq!(badge.text, "3");
    assert_close(
        (badge.left, badge.top),
        (expected_left + CELL / 8.0, expected_top + CELL / 8.0),
    );
    let icon = objects
        .iter()
        .find_map(|(_, obj)| match obj {
            PlacedObject::Path(spec) => Some(spec.clone()),
            _ => None,
        })
        .expect("icon path object");
    assert_close((icon.left, icon.top), (expected_left, expected_top));

    // Toggling again while the badge is up redraws without it
    router
        .handle_chat(&message("!setMarker sleep", &["tok-1"]))
        .await;
    let objects = host.placed_objects();
    assert_eq!(objects.len(), 1);
    assert!(matches!(objects[0].1, PlacedObject::Path(_)));
}

#[tokio::test]
async fn moving_a_token_repositions_every_marker_in_slot_order() {
    let (host, router) = build();
    host.seed_path(drawing("path-1"));
    host.seed_token(token("tok-1"));
    router
        .handle_chat(&message("!saveMarker sleep", &["path-1"]))
        .await;
    router
        .handle_chat(&message("!saveMarker stun", &["path-1"]))
        .await;
    router
        .handle_chat(&message("!setMarker sleep", &["tok-1"]))
        .await;
    router
        .handle_chat(&message("!setMarker stun", &["tok-1"]))
        .await;
    assert_eq!(host.placed_count(), 2);

    let mut moved = token("tok-1");
    moved.left = 700.0;
    moved.top = 140.0;
    router.handle_token_changed(&moved).await;

    let expected: Vec<(f64, f64)> = (0..2)
        .map(|slot| {
            (
                700.0 + 35.0 - CELL / 6.0 - slot as f64 * CELL / 3.0,
                140.0 - 35.0 + CELL / 6.0,
            )
        })
        .collect();
    let mut actual: Vec<(f64, f64)> = host
        .placed_objects()
        .iter()
        .map(|(_, obj)| obj.position())
        .collect();
    actual.sort_by(|a, b| b.0.total_cmp(&a.0));
    for (a, e) in actual.iter().zip(expected.iter()) {
        assert_close(*a, *e);
    }
}

#[tokio::test]
async fn destroying_a_token_clears_its_markers() {
    let (host, router) = build();
    host.seed_path(drawing("path-1"));
    host.seed_token(token("tok-1"));
    router
        .handle_chat(&message("!saveMarker sleep", &["path-1"]))
        .await;
    router
        .handle_chat(&message("!setMarker sleep 2", &["tok-1"]))
        .await;
    assert_eq!(host.placed_count(), 2);

    router
        .handle_token_destroyed(&ObjectId::new("tok-1"))
        .await;
    assert_eq!(host.placed_count(), 0);

    // A second destroy event for the same token is a no-op
    router
        .handle_token_destroyed(&ObjectId::new("tok-1"))
        .await;
}

#[tokio::test]
async fn image_markers_store_the_thumbnail_and_scale_to_fit() {
    let (host, router) = build();
    host.seed_graphic(GraphicObject {
        id: ObjectId::new("img-1"),
        left: 35.0,
        top: 35.0,
        width: 140.0,
        height: 70.0,
        image_source: "https://img.example/abc/max.png".to_string(),
    });
    host.seed_token(token("tok-1"));

    router
        .handle_chat(&message("!saveMarker badge", &["img-1"]))
        .await;
    let notes = host.handout_notes("SavedCustomStatusMarkers").unwrap();
    assert!(notes.contains("https://img.example/abc/thumb.png"));

    router
        .handle_chat(&message("!setMarker badge", &["tok-1"]))
        .await;
    let objects = host.placed_objects();
    assert_eq!(objects.len(), 1);
    let PlacedObject::Graphic(spec) = &objects[0].1 else {
        panic!("expected an image icon");
    };
    // scale = cell / 140 / 3; the source box is 140x70
    let scale = CELL / 140.0 / 3.0;
    assert!((spec.width - 140.0 * scale).abs() < 1e-9);
    assert!((spec.height - 70.0 * scale).abs() < 1e-9);
    assert_eq!(spec.image_source, "https://img.example/abc/thumb.png");
}

#[tokio::test]
async fn unknown_marker_names_report_a_bad_command() {
    let (host, router) = build();
    host.seed_token(token("tok-1"));

    router
        .handle_chat(&message("!setMarker ghost", &["tok-1"]))
        .await;

    assert_eq!(host.placed_count(), 0);
    let log = host.chat_log();
    assert!(log
        .iter()
        .any(|(_, line)| line == "/w Alice bad command: !setMarker ghost"));
}

#[tokio::test]
async fn save_with_nothing_selected_whispers_a_validation_error() {
    let (host, router) = build();
    router.handle_chat(&message("!saveMarker sleep", &[])).await;

    assert!(host.handout_notes("SavedCustomStatusMarkers").is_none());
    let log = host.chat_log();
    assert!(log
        .iter()
        .any(|(_, line)| line.starts_with("/w Alice") && line.contains("selected drawing")));
}
