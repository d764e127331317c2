//! JSON command protocol for scripted sessions.
//!
//! Each command maps onto one session operation. Structural errors come back
//! as `success: false` responses rather than aborting a batch.

use serde::{Deserialize, Serialize};
use serde_json::json;
use shared::{Axis, Color, FloorType, Footprint, PlanPoint};

use crate::catalog::TemplateLibrary;
use crate::error::LayoutError;
use crate::harness::TestHarness;
use crate::state::UpdateKind;
use crate::units::PlanRect;

fn committed() -> UpdateKind {
    UpdateKind::Committed
}

/// A command a script can execute against a session
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum SessionCommand {
    /// Add a catalog item; position in feet
    CreateInstance {
        #[serde(rename = "type")]
        type_id: String,
        #[serde(default)]
        subtype: Option<String>,
        #[serde(default)]
        x: f64,
        #[serde(default)]
        y: f64,
    },
    MoveInstance {
        id: String,
        x: f64,
        y: f64,
    },
    ResizeInstance {
        id: String,
        width: f64,
        length: f64,
    },
    RecolorInstance {
        id: String,
        color: Color,
    },
    DeleteInstance {
        id: String,
    },
    /// Replace the design with a built-in template
    ApplyTemplate {
        template: String,
    },
    SetRoomDimensions {
        width: f64,
        length: f64,
    },
    SetFloorType {
        floor_type: FloorType,
    },
    SetFloorTexture {
        #[serde(default)]
        texture: Option<String>,
    },
    SetWallColor {
        color: Color,
    },
    SetFloorColor {
        color: Color,
    },
    /// Plan view drag, in editor units
    DragPlan {
        id: String,
        x: f64,
        y: f64,
        #[serde(default = "committed")]
        kind: UpdateKind,
    },
    /// Plan view transformer box, in editor units
    TransformPlan {
        id: String,
        rect: PlanRect,
        #[serde(default = "committed")]
        kind: UpdateKind,
    },
    /// Perspective drag, in world units
    DragWorld {
        id: String,
        x: f64,
        z: f64,
        #[serde(default = "committed")]
        kind: UpdateKind,
    },
    SetScaleFactor {
        id: String,
        factor: f64,
        #[serde(default = "committed")]
        kind: UpdateKind,
    },
    SetRotation {
        id: String,
        axis: Axis,
        radians: f64,
        #[serde(default = "committed")]
        kind: UpdateKind,
    },
    /// Drop an unfinished gesture
    CancelTransient,
    Select {
        id: String,
    },
    ClearSelection,
    Undo,
    Redo,
    /// Run pending asset loads against the harness asset table
    LoadAssets,
    /// List the room and every instance
    Inspect,
    /// Export the design as JSON
    ExportDesign,
}

/// Response from executing a command
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }
}

impl From<LayoutError> for CommandResponse {
    fn from(e: LayoutError) -> Self {
        Self::err(e.to_string())
    }
}

fn respond<T>(result: Result<T, LayoutError>, data: impl FnOnce(T) -> serde_json::Value) -> CommandResponse {
    match result {
        Ok(value) => CommandResponse::ok_with_data(data(value)),
        Err(e) => e.into(),
    }
}

/// Execute a single command on the harness
pub fn execute_command(harness: &mut TestHarness, cmd: SessionCommand) -> CommandResponse {
    let session = &mut harness.session;
    match cmd {
        SessionCommand::CreateInstance { type_id, subtype, x, y } => respond(
            session.create_instance(&type_id, subtype.as_deref(), PlanPoint::new(x, y)),
            |id| json!({ "id": id }),
        ),

        SessionCommand::MoveInstance { id, x, y } => {
            respond(session.move_instance(&id, PlanPoint::new(x, y)), |p| json!({ "position": p }))
        }

        SessionCommand::ResizeInstance { id, width, length } => respond(
            session.resize_instance(&id, Footprint::new(width, length)),
            |fp| json!({ "footprint": fp }),
        ),

        SessionCommand::RecolorInstance { id, color } => {
            respond(session.recolor_instance(&id, color), |_| json!({ "color": color }))
        }

        SessionCommand::DeleteInstance { id } => {
            respond(session.delete_instance(&id), |_| json!({ "removed": id }))
        }

        SessionCommand::ApplyTemplate { template } => {
            let library = TemplateLibrary::builtin();
            match library.get(&template) {
                Some(t) => respond(session.apply_template(t), |_| {
                    json!({ "instances": session_ids(harness) })
                }),
                None => LayoutError::UnknownTemplate(template).into(),
            }
        }

        SessionCommand::SetRoomDimensions { width, length } => {
            respond(session.set_room_dimensions(width, length), |_| json!({ "width": width, "length": length }))
        }

        SessionCommand::SetFloorType { floor_type } => {
            session.set_floor_type(floor_type);
            CommandResponse::ok()
        }

        SessionCommand::SetFloorTexture { texture } => {
            respond(session.set_floor_texture(texture.clone()), |_| json!({ "texture": texture }))
        }

        SessionCommand::SetWallColor { color } => {
            session.set_wall_color(color);
            CommandResponse::ok()
        }

        SessionCommand::SetFloorColor { color } => {
            session.set_floor_color(color);
            CommandResponse::ok()
        }

        SessionCommand::DragPlan { id, x, y, kind } => {
            respond(session.drag_plan(&id, x, y, kind), |p| json!({ "position": p }))
        }

        SessionCommand::TransformPlan { id, rect, kind } => {
            respond(session.transform_plan(&id, rect, kind), |(p, fp)| {
                json!({ "position": p, "footprint": fp })
            })
        }

        SessionCommand::DragWorld { id, x, z, kind } => {
            respond(session.drag_world(&id, x, z, kind), |w| json!({ "world": w }))
        }

        SessionCommand::SetScaleFactor { id, factor, kind } => {
            respond(session.set_scale_factor(&id, factor, kind), |f| json!({ "scale_factor": f }))
        }

        SessionCommand::SetRotation { id, axis, radians, kind } => {
            respond(session.set_rotation(&id, axis, radians, kind), |r| json!({ "rotation": r }))
        }

        SessionCommand::CancelTransient => {
            session.cancel_transient();
            CommandResponse::ok()
        }

        SessionCommand::Select { id } => respond(session.select(&id), |_| json!({ "selected": id })),

        SessionCommand::ClearSelection => {
            session.clear_selection();
            CommandResponse::ok()
        }

        SessionCommand::Undo => {
            let undone = session.undo();
            CommandResponse::ok_with_data(json!({ "undone": undone }))
        }

        SessionCommand::Redo => {
            let redone = session.redo();
            CommandResponse::ok_with_data(json!({ "redone": redone }))
        }

        SessionCommand::LoadAssets => {
            let loaded = harness.load_all();
            CommandResponse::ok_with_data(json!({ "loaded": loaded }))
        }

        SessionCommand::Inspect => inspect(harness),

        SessionCommand::ExportDesign => {
            let json = harness.export_design_json();
            CommandResponse::ok_with_data(json!({ "design_json": json }))
        }
    }
}

fn session_ids(harness: &TestHarness) -> Vec<String> {
    harness.session.design().ids().cloned().collect()
}

fn inspect(harness: &TestHarness) -> CommandResponse {
    let session = &harness.session;
    let design = session.design();
    let instances: Vec<serde_json::Value> = design
        .furniture
        .iter()
        .map(|inst| {
            let overlay = session.overlay().get(&inst.id);
            json!({
                "id": inst.id,
                "type": inst.type_id,
                "name": inst.name,
                "position": inst.position,
                "footprint": inst.footprint,
                "color": inst.color,
                "scale_factor": overlay.map(|t| t.scale_factor),
                "world": overlay.map(|t| t.world_position),
                "loading": session.is_loading(&inst.id),
            })
        })
        .collect();
    CommandResponse::ok_with_data(json!({
        "view": session.view(),
        "room": design.room,
        "instance_count": instances.len(),
        "instances": instances,
        "selected": session.selected(),
        "can_undo": session.can_undo(),
        "can_redo": session.can_redo(),
        "version": session.version(),
    }))
}

/// Parse and execute a single JSON command string
pub fn execute_json(harness: &mut TestHarness, json: &str) -> Result<CommandResponse, String> {
    let cmd: SessionCommand =
        serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
    Ok(execute_command(harness, cmd))
}

/// Parse and execute multiple JSON commands (array)
pub fn execute_json_batch(harness: &mut TestHarness, json: &str) -> Result<Vec<CommandResponse>, String> {
    let cmds: Vec<SessionCommand> =
        serde_json::from_str(json).map_err(|e| format!("Invalid commands JSON: {e}"))?;
    Ok(cmds.into_iter().map(|cmd| execute_command(harness, cmd)).collect())
}
