use super::*;
use crate::foundation::core::Size;
use crate::layout::strategy::compute_layout;

fn items() -> Vec<GridItem> {
    vec![
        GridItem::new("a", 100.0, 50.0),
        GridItem::new("b", 100.0, 50.0),
        GridItem::new("c", 100.0, 50.0),
    ]
}

#[test]
fn stagger_delays_follow_mode() {
    let progressive = StaggerOptions {
        mode: DelayMode::Progressive,
        delay_ms: 50,
    };
    assert_eq!(
        (0..4).map(|k| progressive.delay_for(k)).collect::<Vec<_>>(),
        vec![0, 50, 100, 150]
    );

    let alternate = StaggerOptions {
        mode: DelayMode::Alternate,
        delay_ms: 50,
    };
    assert_eq!(
        (0..4).map(|k| alternate.delay_for(k)).collect::<Vec<_>>(),
        vec![50, 0, 50, 0]
    );

    let disabled = StaggerOptions {
        mode: DelayMode::Disabled,
        delay_ms: 50,
    };
    assert_eq!(disabled.delay_for(3), 0);
}

#[test]
fn hidden_items_get_no_position_or_delay() {
    let items = items();
    let active = [true, false, true];
    let sizes = [Size::new(100.0, 50.0), Size::new(100.0, 50.0)];
    let layout = compute_layout(LayoutKind::Packed, &sizes, 300.0, None).unwrap();
    let stagger = StaggerOptions {
        mode: DelayMode::Progressive,
        delay_ms: 10,
    };

    let plan =
        PlacementPlan::build(&items, &[0, 1, 2], &active, LayoutKind::Packed, &layout, &stagger)
            .unwrap();

    assert_eq!(plan.placements.len(), 3);
    let b = plan.get("b").unwrap();
    assert!(!b.visible);
    assert_eq!(b.position, None);
    assert_eq!(b.delay_ms, 0);

    let c = plan.get("c").unwrap();
    assert_eq!(c.position, Some(Position::new(100.0, 0.0)));
    assert_eq!(c.delay_ms, 10);

    assert_eq!(plan.visible().count(), 2);
    assert_eq!(plan.container_height, ContainerHeight::Px(50.0));
}

#[test]
fn placements_follow_display_order() {
    let items = items();
    let sizes = [Size::new(100.0, 50.0); 3];
    let layout = compute_layout(LayoutKind::Horizontal, &sizes, 300.0, None).unwrap();
    let plan = PlacementPlan::build(
        &items,
        &[2, 0, 1],
        &[true; 3],
        LayoutKind::Horizontal,
        &layout,
        &StaggerOptions::default(),
    )
    .unwrap();

    let ids: Vec<&str> = plan.placements.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["c", "a", "b"]);
    assert_eq!(plan.get("c").unwrap().position, Some(Position::new(0.0, 0.0)));
    assert_eq!(plan.get("b").unwrap().position, Some(Position::new(200.0, 0.0)));
}

#[test]
fn mismatched_layout_is_an_internal_error() {
    let items = items();
    let err = PlacementPlan::build(
        &items,
        &[0, 1, 2],
        &[true; 3],
        LayoutKind::Packed,
        &LayoutResult::empty(),
        &StaggerOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, GridfitError::Internal(_)));
}

#[test]
fn without_height_reports_auto() {
    let plan = PlacementPlan::build(
        &[],
        &[],
        &[],
        LayoutKind::SameSize,
        &LayoutResult::empty(),
        &StaggerOptions::default(),
    )
    .unwrap()
    .without_height();
    assert_eq!(plan.container_height, ContainerHeight::Auto);
    let json = serde_json::to_value(&plan).unwrap();
    assert_eq!(json["container_height"], "auto");
    assert_eq!(json["layout"], "sameSize");
}
