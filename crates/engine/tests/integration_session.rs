//! Integration tests for the layout session.
//!
//! Drives both views through the harness: transient vs committed updates,
//! clamping, history, asset loads and cross-view handoff.

use std::f64::consts::{FRAC_PI_2, PI};

use approx::assert_relative_eq;
use furnish_engine_lib::catalog::TemplateLibrary;
use furnish_engine_lib::fixtures::*;
use furnish_engine_lib::harness::TestHarness;
use furnish_engine_lib::loader::AssetLoader;
use furnish_engine_lib::placement::{MeshSource, Placement};
use furnish_engine_lib::settings::EngineSettings;
use furnish_engine_lib::units::PlanRect;
use furnish_engine_lib::{LayoutError, UpdateKind, ViewKind};
use shared::{Axis, Color, FloorType, Footprint, PlanPoint};

fn one_table(x: f64, y: f64, w: f64, l: f64) -> shared::Design {
    design_with(room(20.0, 20.0), vec![instance_at("a", x, y, w, l)])
}

// ── Entry and handoff ───────────────────────────────────────────

#[test]
fn test_entry_overlay_from_plan() {
    let h = TestHarness::perspective(one_table(4.0, 4.0, 6.0, 6.0));
    let t = h.session.overlay().get("a").unwrap();
    assert_eq!(t.scale_factor, 1.0);
    assert_eq!(t.rotation, shared::Rotation::default());
    assert_relative_eq!(t.world_position[0], -3.0);
    assert_relative_eq!(t.world_position[2], -3.0);
    // Proxy box of height 2 rests on the floor
    assert_relative_eq!(t.world_position[1], 1.0);
    assert!(!h.session.can_undo());
}

#[test]
fn test_invalid_room_rejected_on_entry() {
    let design = design_with(room(0.0, 10.0), vec![]);
    let err = TestHarness::try_new(design, ViewKind::Plan, EngineSettings::default()).err();
    assert!(matches!(err, Some(LayoutError::InvalidRoom { .. })));
}

#[test]
fn test_duplicate_ids_rejected_on_entry() {
    let design = design_with(
        room(20.0, 20.0),
        vec![instance_at("a", 0.0, 0.0, 2.0, 2.0), instance_at("a", 6.0, 6.0, 3.0, 3.0)],
    );
    let err = TestHarness::try_new(design, ViewKind::Plan, EngineSettings::default()).err();
    assert_eq!(err, Some(LayoutError::DuplicateId("a".into())));
}

#[test]
fn test_non_finite_position_rejected_on_entry() {
    let design = design_with(room(20.0, 20.0), vec![instance_at("a", 2.0, f64::NAN, 2.0, 2.0)]);
    let err = TestHarness::try_new(design, ViewKind::Perspective, EngineSettings::default()).err();
    assert!(matches!(err, Some(LayoutError::InvalidTransform(_))));
}

#[test]
fn test_entry_raises_broken_footprints() {
    let design = design_with(
        room(20.0, 20.0),
        vec![instance_at("a", 2.0, 2.0, -3.0, f64::NAN), instance_at("b", 6.0, 6.0, 0.0, 4.0)],
    );
    let h = TestHarness::try_new(design, ViewKind::Plan, EngineSettings::default()).unwrap();
    assert_eq!(h.instance("a").unwrap().footprint, Footprint::new(0.2, 0.2));
    assert_eq!(h.instance("b").unwrap().footprint, Footprint::new(0.2, 4.0));
    assert!(!h.session.can_undo());
}

#[test]
fn test_rejected_design_json_keeps_current_session() {
    let mut h = TestHarness::plan(one_table(0.0, 0.0, 2.0, 2.0));
    let mut twins = one_table(0.0, 0.0, 2.0, 2.0);
    twins.furniture.push(instance_at("a", 5.0, 5.0, 2.0, 2.0));
    let json = serde_json::to_string(&twins).unwrap();

    let err = h.load_design_json(&json).unwrap_err();
    assert!(err.contains("more than once"));
    assert_eq!(h.instance_count(), 1);

    // Deleting the surviving instance leaves nothing behind
    h.session.delete_instance("a").unwrap();
    assert_eq!(h.instance_count(), 0);
}

#[test]
fn test_handoff_is_exact_division() {
    let mut h = TestHarness::new();
    let id = h.create("chair", Some("stool")).unwrap();
    let placed = h.session.drag_plan(&id, 123.0, 47.0, UpdateKind::Committed).unwrap();
    assert_eq!(placed, PlanPoint::new(123.0 / 10.0, 47.0 / 10.0));

    let exported = h.session.export_design();
    assert_eq!(exported.instance(&id).unwrap().position, placed);
    h.switch_view(ViewKind::Perspective).unwrap();
    assert_eq!(h.session.design(), &exported);
}

// ── Transient vs committed ──────────────────────────────────────

#[test]
fn test_transient_plan_drag_is_unclamped_and_unrecorded() {
    let mut h = TestHarness::new();
    let id = h.create("chair", Some("stool")).unwrap();
    assert_eq!(h.session.history_len(), 2);

    for x in [-10.0, -30.0, -50.0] {
        h.session.drag_plan(&id, x, 300.0, UpdateKind::Transient).unwrap();
    }
    assert_eq!(h.session.history_len(), 2);
    assert_eq!(h.instance(&id).unwrap().position, PlanPoint::new(-5.0, 30.0));

    let placed = h.session.drag_plan(&id, -50.0, 300.0, UpdateKind::Committed).unwrap();
    assert_eq!(placed, PlanPoint::new(0.0, 15.0));
    assert_eq!(h.session.history_len(), 3);

    assert!(h.undo());
    assert_eq!(h.instance(&id).unwrap().position, PlanPoint::new(5.0, 5.0));
}

#[test]
fn test_transient_updates_bump_version() {
    let mut h = TestHarness::new();
    let id = h.create("chair", Some("stool")).unwrap();
    let v = h.session.version();
    h.session.drag_plan(&id, 10.0, 10.0, UpdateKind::Transient).unwrap();
    assert!(h.session.version() > v);
}

#[test]
fn test_cancel_transient_restores_committed() {
    let mut h = TestHarness::new();
    let id = h.create("chair", Some("stool")).unwrap();
    h.session.drag_plan(&id, 100.0, 100.0, UpdateKind::Transient).unwrap();
    h.session.cancel_transient();
    assert_eq!(h.instance(&id).unwrap().position, PlanPoint::new(5.0, 5.0));
    assert_eq!(h.session.history_len(), 2);
}

#[test]
fn test_discrete_edit_drops_pending_world_drag() {
    let mut h = TestHarness::perspective(one_table(0.0, 0.0, 4.0, 2.0));
    let red = Color::rgb(0xff, 0, 0);
    h.session.drag_world("a", 5.0, 3.0, UpdateKind::Transient).unwrap();
    h.session.recolor_instance("a", red).unwrap();

    let settled = |h: &TestHarness| {
        let t = h.session.overlay().get("a").unwrap();
        (t.world_position[0], t.world_position[2])
    };
    assert_eq!(settled(&h), (-8.0, -9.0));
    assert_eq!(h.instance("a").unwrap().color, red);
    assert_eq!(h.session.history_len(), 2);

    assert!(h.undo());
    assert_eq!(settled(&h), (-8.0, -9.0));
    assert_ne!(h.instance("a").unwrap().color, red);
    assert!(h.redo());
    assert_eq!(settled(&h), (-8.0, -9.0));
    assert_eq!(h.instance("a").unwrap().color, red);
}

#[test]
fn test_room_edit_drops_pending_scale() {
    let mut h = TestHarness::perspective(one_table(0.0, 0.0, 4.0, 2.0));
    h.session.set_scale_factor("a", 1.8, UpdateKind::Transient).unwrap();
    h.session.set_wall_color(Color::rgb(1, 2, 3));

    assert_eq!(h.session.overlay().get("a").unwrap().scale_factor, 1.0);
    assert!(h.undo());
    assert_eq!(h.session.overlay().get("a").unwrap().scale_factor, 1.0);
    assert_ne!(h.session.design().room.wall_color, Color::rgb(1, 2, 3));
}

#[test]
fn test_discrete_edit_drops_pending_plan_drag() {
    let mut h = TestHarness::plan(one_table(0.0, 0.0, 2.0, 2.0));
    h.session.drag_plan("a", 100.0, 100.0, UpdateKind::Transient).unwrap();
    assert_eq!(h.instance("a").unwrap().position, PlanPoint::new(10.0, 10.0));

    h.session.recolor_instance("a", Color::rgb(0, 0xff, 0)).unwrap();
    assert_eq!(h.instance("a").unwrap().position, PlanPoint::new(0.0, 0.0));
    assert!(h.undo());
    assert!(h.redo());
    assert_eq!(h.instance("a").unwrap().position, PlanPoint::new(0.0, 0.0));
}

#[test]
fn test_world_drag_clamps_every_frame() {
    let mut h = TestHarness::perspective(one_table(0.0, 0.0, 4.0, 2.0));

    let w = h.session.drag_world("a", 100.0, -100.0, UpdateKind::Transient).unwrap();
    assert_eq!([w[0], w[2]], [8.0, -9.0]);
    assert_eq!(h.instance("a").unwrap().position, PlanPoint::new(0.0, 0.0));
    assert!(!h.session.can_undo());

    h.session.drag_world("a", 100.0, -100.0, UpdateKind::Committed).unwrap();
    assert_eq!(h.instance("a").unwrap().position, PlanPoint::new(16.0, 0.0));
    assert!(h.session.can_undo());
}

#[test]
fn test_committed_world_drag_agrees_with_design_when_shrunk() {
    let mut h = TestHarness::perspective(one_table(0.0, 0.0, 4.0, 4.0));
    h.session.set_scale_factor("a", 0.5, UpdateKind::Committed).unwrap();

    // While dragging the half-size box may reach the wall
    let w = h.session.drag_world("a", 100.0, 0.0, UpdateKind::Transient).unwrap();
    assert_eq!(w[0], 9.0);

    // The committed spot must also hold the unscaled plan footprint
    let w = h.session.drag_world("a", 100.0, 0.0, UpdateKind::Committed).unwrap();
    assert_eq!(w[0], 8.0);
    assert_eq!(h.session.overlay().get("a").unwrap().world_position[0], 8.0);
    assert_eq!(h.instance("a").unwrap().position, PlanPoint::new(16.0, 8.0));

    h.switch_view(ViewKind::Plan).unwrap();
    h.switch_view(ViewKind::Perspective).unwrap();
    assert_relative_eq!(h.session.overlay().get("a").unwrap().world_position[0], 8.0);
}

#[test]
fn test_non_finite_world_drag_rejected() {
    let mut h = TestHarness::perspective(one_table(0.0, 0.0, 4.0, 2.0));
    let before = h.session.snapshot().clone();
    let err = h.session.drag_world("a", f64::NAN, 0.0, UpdateKind::Committed).unwrap_err();
    assert!(matches!(err, LayoutError::InvalidTransform(_)));
    assert_eq!(h.session.snapshot(), &before);
}

// ── Perspective overlay ─────────────────────────────────────────

#[test]
fn test_scale_factor_clamped_rested_and_reclamped() {
    let mut h = TestHarness::perspective(one_table(16.0, 0.0, 4.0, 2.0));
    let applied = h.session.set_scale_factor("a", 3.0, UpdateKind::Committed).unwrap();
    assert_eq!(applied, 2.0);

    let t = h.session.overlay().get("a").unwrap();
    assert_eq!(t.scale_factor, 2.0);
    assert_relative_eq!(t.world_position[0], 6.0);
    assert_relative_eq!(t.world_position[1], 2.0);
    assert_relative_eq!(t.world_position[2], -8.0);

    assert_eq!(h.session.set_scale_factor("a", 0.1, UpdateKind::Committed).unwrap(), 0.5);
}

#[test]
fn test_rotation_normalized() {
    let mut h = TestHarness::perspective(one_table(0.0, 0.0, 2.0, 2.0));
    let r = h.session.set_rotation("a", Axis::Y, -FRAC_PI_2, UpdateKind::Committed).unwrap();
    assert_relative_eq!(r.y, 3.0 * FRAC_PI_2);
    let r = h.session.set_rotation("a", Axis::X, 5.0 * PI, UpdateKind::Committed).unwrap();
    assert_relative_eq!(r.x, PI, epsilon = 1e-12);
    assert!(h.undo());
    assert_relative_eq!(h.session.overlay().get("a").unwrap().rotation.x, 0.0);
}

#[test]
fn test_ops_rejected_in_wrong_view() {
    let mut plan = TestHarness::plan(one_table(0.0, 0.0, 2.0, 2.0));
    let err = plan.session.set_scale_factor("a", 1.2, UpdateKind::Committed).unwrap_err();
    assert_eq!(
        err,
        LayoutError::UnsupportedInView {
            op: "set_scale_factor",
            view: ViewKind::Plan
        }
    );
    assert!(plan.session.drag_world("a", 0.0, 0.0, UpdateKind::Committed).is_err());

    let mut persp = TestHarness::perspective(one_table(0.0, 0.0, 2.0, 2.0));
    assert!(persp.session.drag_plan("a", 0.0, 0.0, UpdateKind::Committed).is_err());
    assert!(persp
        .session
        .transform_plan(
            "a",
            PlanRect {
                x: 0.0,
                y: 0.0,
                width: 10.0,
                length: 10.0
            },
            UpdateKind::Committed
        )
        .is_err());
}

#[test]
fn test_recolor_in_perspective_writes_design() {
    let mut h = TestHarness::perspective(one_table(0.0, 0.0, 2.0, 2.0));
    let red = Color::rgb(0xff, 0, 0);
    h.session.recolor_instance("a", red).unwrap();
    h.switch_view(ViewKind::Plan).unwrap();
    assert_eq!(h.instance("a").unwrap().color, red);
    assert_eq!(h.session.plan_items()[0].color, red);
}

// ── Plan edits ──────────────────────────────────────────────────

#[test]
fn test_transform_plan_normalizes_rect() {
    let mut h = TestHarness::plan(one_table(0.0, 0.0, 2.0, 2.0));
    let rect = PlanRect {
        x: 55.0,
        y: 12.0,
        width: 80.0,
        length: 30.0,
    };
    let (pos, fp) = h.session.transform_plan("a", rect, UpdateKind::Committed).unwrap();
    assert_eq!(pos, PlanPoint::new(5.5, 1.2));
    assert_eq!(fp, Footprint::new(8.0, 3.0));
}

#[test]
fn test_resize_raises_to_minimum() {
    let mut h = TestHarness::plan(one_table(0.0, 0.0, 2.0, 2.0));
    let fp = h.session.resize_instance("a", Footprint::new(0.01, -1.0)).unwrap();
    assert_eq!(fp, Footprint::new(0.2, 0.2));
}

#[test]
fn test_unknown_id_is_not_found_and_harmless() {
    let mut h = TestHarness::new();
    let before = h.session.snapshot().clone();
    assert_eq!(
        h.session.move_instance("ghost", PlanPoint::new(1.0, 1.0)).unwrap_err(),
        LayoutError::NotFound("ghost".into())
    );
    assert!(h.session.delete_instance("ghost").is_err());
    assert!(h.session.select("ghost").is_err());
    assert_eq!(h.session.snapshot(), &before);
    assert_eq!(h.session.history_len(), 1);
}

#[test]
fn test_catalog_miss_leaves_design() {
    let mut h = TestHarness::new();
    let err = h.create("hovercraft", None).unwrap_err();
    assert!(matches!(err, LayoutError::CatalogLookup { .. }));
    assert_eq!(h.instance_count(), 0);
    assert!(!h.session.can_undo());
}

// ── Selection ───────────────────────────────────────────────────

#[test]
fn test_create_selects_and_delete_clears() {
    let mut h = TestHarness::new();
    let a = h.create("chair", Some("stool")).unwrap();
    assert_eq!(h.session.selected(), Some(&a));
    let b = h.create("table", None).unwrap();
    assert_eq!(h.session.selected(), Some(&b));

    h.session.delete_instance(&a).unwrap();
    assert_eq!(h.session.selected(), Some(&b));
    h.session.delete_instance(&b).unwrap();
    assert_eq!(h.session.selected(), None);
}

#[test]
fn test_undo_prunes_selection() {
    let mut h = TestHarness::new();
    let id = h.create("chair", Some("stool")).unwrap();
    assert!(h.undo());
    assert_eq!(h.session.selected(), None);
    assert!(h.redo());
    assert!(h.instance(&id).is_some());
    assert_eq!(h.session.selected(), None);
}

// ── Room ────────────────────────────────────────────────────────

#[test]
fn test_room_shrink_reclamps_design_and_overlay() {
    let mut h = TestHarness::perspective(one_table(16.0, 16.0, 4.0, 4.0));
    h.session.set_room_dimensions(10.0, 10.0).unwrap();
    assert_eq!(h.instance("a").unwrap().position, PlanPoint::new(6.0, 6.0));
    let t = h.session.overlay().get("a").unwrap();
    assert_relative_eq!(t.world_position[0], 3.0);
    assert_relative_eq!(t.world_position[2], 3.0);
}

#[test]
fn test_invalid_room_dimensions_rejected() {
    let mut h = TestHarness::new();
    for (w, l) in [(0.0, 5.0), (-1.0, 5.0), (5.0, f64::NAN)] {
        assert!(matches!(
            h.session.set_room_dimensions(w, l),
            Err(LayoutError::InvalidRoom { .. })
        ));
    }
    assert_eq!(h.session.design().room.width(), 20.0);
    assert!(!h.session.can_undo());
}

#[test]
fn test_floor_texture_follows_floor_type() {
    let mut h = TestHarness::new();
    h.session.set_floor_texture(Some("/assets/marble.jpg".into())).unwrap();
    h.session.set_floor_type(FloorType::Carpet);
    assert_eq!(h.session.design().room.floor_texture, None);

    let err = h.session.set_floor_texture(Some("/assets/marble.jpg".into())).unwrap_err();
    assert!(matches!(err, LayoutError::InvalidTexture { .. }));
    h.session.set_floor_texture(Some("/textures/carpet_gray.jpg".into())).unwrap();

    // texture, type, texture
    assert!(h.undo());
    assert!(h.undo());
    assert_eq!(h.session.design().room.floor_type, FloorType::Tile);
    assert_eq!(h.session.design().room.floor_texture.as_deref(), Some("/assets/marble.jpg"));
}

#[test]
fn test_wall_and_floor_colors_are_undoable() {
    let mut h = TestHarness::new();
    let original = h.session.design().room.clone();
    h.session.set_wall_color(Color::rgb(1, 2, 3));
    h.session.set_floor_color(Color::rgb(4, 5, 6));
    assert_eq!(h.session.design().room.wall_color, Color::rgb(1, 2, 3));
    assert!(h.undo());
    assert!(h.undo());
    assert_eq!(h.session.design().room, original);
}

// ── Templates ───────────────────────────────────────────────────

#[test]
fn test_template_is_one_step() {
    let mut h = TestHarness::new();
    h.create("chair", Some("stool")).unwrap();
    let library = TemplateLibrary::builtin();
    h.session.apply_template(library.get("living-room").unwrap()).unwrap();

    assert_eq!(h.instance_count(), 3);
    assert_eq!(h.session.design().room.width(), 50.0);
    assert_eq!(h.session.selected(), None);

    assert!(h.undo());
    assert_eq!(h.instance_count(), 1);
    assert_eq!(h.session.design().room.width(), 20.0);
}

#[test]
fn test_template_catalog_miss_aborts_whole_template() {
    let mut h = TestHarness::new();
    let mut template = TemplateLibrary::builtin().get("bedroom").unwrap().clone();
    template.furniture[2].type_id = "jacuzzi".into();

    let before = h.session.snapshot().clone();
    assert!(matches!(
        h.session.apply_template(&template),
        Err(LayoutError::CatalogLookup { .. })
    ));
    assert_eq!(h.session.snapshot(), &before);
    assert!(!h.session.can_undo());
}

// ── History ─────────────────────────────────────────────────────

#[test]
fn test_new_edit_after_undo_truncates() {
    let mut h = TestHarness::plan(one_table(0.0, 0.0, 2.0, 2.0));
    h.session.move_instance("a", PlanPoint::new(1.0, 1.0)).unwrap();
    h.session.move_instance("a", PlanPoint::new(2.0, 2.0)).unwrap();
    assert!(h.undo());
    h.session.move_instance("a", PlanPoint::new(3.0, 3.0)).unwrap();

    assert!(!h.redo());
    assert_eq!(h.instance("a").unwrap().position, PlanPoint::new(3.0, 3.0));
    assert!(h.undo());
    assert_eq!(h.instance("a").unwrap().position, PlanPoint::new(1.0, 1.0));
}

#[test]
fn test_history_limit_keeps_entry_state() {
    let settings = EngineSettings {
        history_limit: 3,
        ..EngineSettings::default()
    };
    let mut h = TestHarness::try_new(one_table(0.0, 0.0, 1.0, 1.0), ViewKind::Plan, settings).unwrap();
    for i in 1..=5 {
        let v = i as f64;
        h.session.move_instance("a", PlanPoint::new(v, v)).unwrap();
    }
    assert_eq!(h.session.history_len(), 3);
    assert!(h.undo());
    assert_eq!(h.instance("a").unwrap().position, PlanPoint::new(4.0, 4.0));
    assert!(h.undo());
    assert_eq!(h.instance("a").unwrap().position, PlanPoint::new(0.0, 0.0));
    assert!(!h.undo());
}

#[test]
fn test_ids_never_reused() {
    let mut h = TestHarness::new();
    assert_eq!(h.create("chair", Some("stool")).unwrap(), "stool-1");
    assert!(h.undo());
    assert_eq!(h.create("chair", Some("stool")).unwrap(), "stool-2");
}

#[test]
fn test_ids_skip_those_in_entry_design() {
    let design = design_with(room(20.0, 20.0), vec![instance_at("stool-1", 0.0, 0.0, 1.0, 1.0)]);
    let mut h = TestHarness::plan(design);
    assert_eq!(h.create("chair", Some("stool")).unwrap(), "stool-2");
}

// ── Asset loads ─────────────────────────────────────────────────

fn lamp_room() -> TestHarness {
    let design = design_with(
        room(20.0, 20.0),
        vec![
            instance_with_asset("lamp", "/lamp.gltf", 2.0, 2.0, 2.0, 2.0),
            instance_with_asset("vase", "/vase.gltf", 8.0, 8.0, 2.0, 2.0),
        ],
    );
    let mut h = TestHarness::perspective(design);
    h.register_asset("/lamp.gltf", centered_bounds(1.0, 1.0, 1.0));
    h.register_asset("/vase.gltf", unit_bounds());
    h
}

#[test]
fn test_loaded_asset_rests_on_floor() {
    let mut h = lamp_room();
    // Nothing drawn until the load lands
    assert_eq!(h.world_item("lamp").unwrap().mesh, None);
    assert_eq!(h.load_all(), 2);

    let item = h.world_item("lamp").unwrap();
    assert!(matches!(item.mesh, Some(MeshSource::Asset { .. })));
    // 1 x 1 x 1 centered asset on a 2 x 2 footprint: scale 2, lowest point at -1
    assert_relative_eq!(item.scale, 2.0);
    assert_relative_eq!(item.world[1], 1.0);

    h.session.set_scale_factor("lamp", 1.5, UpdateKind::Committed).unwrap();
    let item = h.world_item("lamp").unwrap();
    assert_relative_eq!(item.scale, 3.0);
    assert_relative_eq!(item.world[1], 1.5);

    assert!(h.undo());
    assert_relative_eq!(h.world_item("lamp").unwrap().world[1], 1.0);
}

#[test]
fn test_entry_snapshot_picks_up_loaded_heights_on_undo() {
    let mut h = lamp_room();
    h.session.set_rotation("vase", Axis::Y, 1.0, UpdateKind::Committed).unwrap();
    h.load_all();
    // The entry snapshot was taken before the lamp loaded
    assert!(h.undo());
    assert_relative_eq!(h.world_item("lamp").unwrap().world[1], 1.0);
}

#[test]
fn test_completions_out_of_order() {
    let mut h = lamp_room();
    let requests = h.session.pending_loads();
    assert_eq!(requests.len(), 2);
    assert!(h.session.pending_loads().is_empty(), "in-flight loads are not re-requested");

    for request in requests.iter().rev() {
        let result = h.loader.load(&request.asset_path);
        assert!(h.session.complete_load(&request.instance_id, result));
    }
    assert!(matches!(h.session.placement("lamp"), Some(Placement::Fitted { .. })));
    assert!(matches!(h.session.placement("vase"), Some(Placement::Fitted { .. })));
}

#[test]
fn test_stale_load_is_discarded() {
    let mut h = lamp_room();
    let requests = h.session.pending_loads();
    h.session.delete_instance("lamp").unwrap();
    let before = h.session.snapshot().clone();

    let lamp = requests.iter().find(|r| r.instance_id == "lamp").unwrap();
    let result = h.loader.load(&lamp.asset_path);
    assert!(!h.session.complete_load("lamp", result));

    assert_eq!(h.session.snapshot(), &before);
    assert!(h.session.placement("lamp").is_none());
    assert!(!h.session.is_loading("lamp"));
}

#[test]
fn test_undo_delete_requests_missing_asset_again() {
    let mut h = lamp_room();
    let _ = h.session.pending_loads();
    h.session.delete_instance("lamp").unwrap();
    let result = h.loader.load("/lamp.gltf");
    assert!(!h.session.complete_load("lamp", result));

    assert!(h.undo());
    let again = h.session.pending_loads();
    assert_eq!(again.len(), 1);
    assert_eq!(again[0].instance_id, "lamp");
}

#[test]
fn test_undo_keeps_loaded_mesh() {
    let mut h = lamp_room();
    h.load_all();
    h.session.delete_instance("lamp").unwrap();
    assert!(h.undo());
    assert!(h.session.pending_loads().is_empty());
    assert!(matches!(
        h.world_item("lamp").unwrap().mesh,
        Some(MeshSource::Asset { .. })
    ));
}

#[test]
fn test_failed_load_falls_back_to_proxy() {
    let design = design_with(
        room(20.0, 20.0),
        vec![instance_with_asset("ghost", "/missing.gltf", 0.0, 0.0, 3.0, 4.0)],
    );
    let mut h = TestHarness::perspective(design);
    h.load_all();
    assert_eq!(h.session.placement("ghost"), Some(&Placement::Proxy));
    let item = h.world_item("ghost").unwrap();
    assert_eq!(
        item.mesh,
        Some(MeshSource::ProxyBox {
            width: 3.0,
            height: 2.0,
            length: 4.0
        })
    );
    assert_relative_eq!(item.world[1], 1.0);
}
