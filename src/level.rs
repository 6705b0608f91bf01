//! Level asset loading: fetches the binary glTF level, reads its mesh
//! inventory (names, transforms, geometry, bounds) from the JSON chunk, and
//! resolves which mesh is the interactive one.
//!
//! Only the metadata and raw vertex streams the walkthrough needs are read;
//! materials, animations, and the rest of the format are ignored.

use glam::Vec3;
use serde_json::Value;

use crate::scene::MeshInstance;

const GLB_MAGIC: u32 = 0x4654_6C67;
const CHUNK_JSON: u32 = 0x4E4F_534A;
const CHUNK_BIN: u32 = 0x004E_4942;

const COMPONENT_U8: u64 = 5121;
const COMPONENT_U16: u64 = 5123;
const COMPONENT_U32: u64 = 5125;
const COMPONENT_F32: u64 = 5126;

#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    #[error("asset truncated")]
    Truncated,
    #[error("not a binary glTF container")]
    BadMagic,
    #[error("unsupported container version {0}")]
    UnsupportedVersion(u32),
    #[error("missing JSON chunk")]
    MissingJson,
    #[error("missing binary chunk")]
    MissingBin,
    #[error("glTF parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("glTF schema error: {0}")]
    Schema(String),
    #[error("fetch failed: {0}")]
    Fetch(String),
}

fn schema(msg: &str) -> LevelError {
    LevelError::Schema(msg.to_string())
}

/// How the interactive mesh is selected, in resolution order.
#[derive(Debug, Clone)]
pub enum MeshAnchor {
    Name(String),
    Index(usize),
}

/// Explicit loader configuration: where the level lives and which mesh is
/// draggable. The first anchor that resolves wins.
#[derive(Debug, Clone)]
pub struct LevelConfig {
    pub url: String,
    pub interactive: Vec<MeshAnchor>,
}

impl LevelConfig {
    /// The shipped prototype level: ramp selected by name, with the asset's
    /// historical position in load order as a fallback.
    pub fn prototype_level() -> Self {
        Self {
            url: crate::constants::LEVEL_URL.to_string(),
            interactive: vec![
                MeshAnchor::Name(crate::constants::RAMP_ANCHOR_NAME.to_string()),
                MeshAnchor::Index(crate::constants::RAMP_MESH_INDEX),
            ],
        }
    }
}

/// Resolve the interactive mesh, or `None` when no anchor matches; a missing
/// mesh is not an error, interaction just stays unwired.
pub fn designate_interactive(meshes: &[MeshInstance], anchors: &[MeshAnchor]) -> Option<usize> {
    for anchor in anchors {
        let found = match anchor {
            MeshAnchor::Name(name) => meshes.iter().position(|m| m.name == *name),
            MeshAnchor::Index(index) => (*index < meshes.len()).then_some(*index),
        };
        if found.is_some() {
            return found;
        }
    }
    None
}

/// One mesh pulled out of the level asset, in declaration order.
#[derive(Debug, Clone)]
pub struct LevelMesh {
    pub name: String,
    pub translation: Vec3,
    pub aabb_min: Vec3,
    pub aabb_max: Vec3,
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

#[derive(Debug, Clone, Default)]
pub struct Level {
    pub meshes: Vec<LevelMesh>,
}

/// Scene-side mesh records for a loaded level. Every mesh gets collision
/// checking enabled.
pub fn instantiate(level: &Level) -> Vec<MeshInstance> {
    level
        .meshes
        .iter()
        .enumerate()
        .map(|(i, m)| MeshInstance {
            name: m.name.clone(),
            translation: m.translation,
            aabb_min: m.aabb_min,
            aabb_max: m.aabb_max,
            check_collisions: true,
            geometry: i,
        })
        .collect()
}

/// Parse a binary glTF container into the level mesh inventory.
pub fn parse_glb(bytes: &[u8]) -> Result<Level, LevelError> {
    let (json, bin) = split_chunks(bytes)?;
    let doc: Value = serde_json::from_slice(json)?;
    let mesh_entries = doc
        .get("meshes")
        .and_then(|m| m.as_array())
        .ok_or_else(|| schema("no meshes array"))?;

    let mut meshes = Vec::with_capacity(mesh_entries.len());
    for (mesh_index, entry) in mesh_entries.iter().enumerate() {
        let name = entry
            .get("name")
            .and_then(|n| n.as_str())
            .unwrap_or("unnamed")
            .to_string();

        let mut positions: Vec<[f32; 3]> = Vec::new();
        let mut normals: Vec<[f32; 3]> = Vec::new();
        let mut indices: Vec<u32> = Vec::new();
        let mut normals_complete = true;
        let mut accessor_bounds = None;

        let primitives = entry
            .get("primitives")
            .and_then(|p| p.as_array())
            .ok_or_else(|| schema("mesh without primitives"))?;
        for prim in primitives {
            let attrs = prim
                .get("attributes")
                .ok_or_else(|| schema("primitive without attributes"))?;
            let pos_accessor = attrs
                .get("POSITION")
                .and_then(|v| v.as_u64())
                .ok_or_else(|| schema("primitive without POSITION"))? as usize;
            let base_vertex = positions.len() as u32;
            let prim_positions = read_vec3_accessor(&doc, bin, pos_accessor)?;

            if primitives.len() == 1 {
                accessor_bounds = bounds_from_accessor(&doc, pos_accessor);
            }

            match attrs.get("NORMAL").and_then(|v| v.as_u64()) {
                Some(n) => normals.extend(read_vec3_accessor(&doc, bin, n as usize)?),
                None => {
                    normals_complete = false;
                    normals.resize(normals.len() + prim_positions.len(), [0.0; 3]);
                }
            }

            match prim.get("indices").and_then(|v| v.as_u64()) {
                Some(acc) => indices.extend(
                    read_index_accessor(&doc, bin, acc as usize)?
                        .into_iter()
                        .map(|i| i + base_vertex),
                ),
                None => indices
                    .extend((0..prim_positions.len() as u32).map(|i| i + base_vertex)),
            }
            positions.extend(prim_positions);
        }

        if !normals_complete {
            normals = compute_normals(&positions, &indices);
        }
        let (aabb_min, aabb_max) = match accessor_bounds {
            Some(bounds) => bounds,
            None => bounds_from_positions(&positions),
        };

        meshes.push(LevelMesh {
            name,
            translation: node_translation(&doc, mesh_index),
            aabb_min,
            aabb_max,
            positions,
            normals,
            indices,
        });
    }
    Ok(Level { meshes })
}

fn split_chunks(bytes: &[u8]) -> Result<(&[u8], &[u8]), LevelError> {
    if bytes.len() < 12 {
        return Err(LevelError::Truncated);
    }
    if u32_le(bytes, 0) != GLB_MAGIC {
        return Err(LevelError::BadMagic);
    }
    let version = u32_le(bytes, 4);
    if version != 2 {
        return Err(LevelError::UnsupportedVersion(version));
    }

    let mut json = None;
    let mut bin: &[u8] = &[];
    let mut offset = 12usize;
    while offset + 8 <= bytes.len() {
        let length = u32_le(bytes, offset) as usize;
        let kind = u32_le(bytes, offset + 4);
        let data = bytes
            .get(offset + 8..offset + 8 + length)
            .ok_or(LevelError::Truncated)?;
        match kind {
            CHUNK_JSON => json = Some(data),
            CHUNK_BIN => bin = data,
            _ => {}
        }
        offset += 8 + length;
    }
    Ok((json.ok_or(LevelError::MissingJson)?, bin))
}

/// Byte range and stride for an accessor's data within the binary chunk.
fn accessor_layout(
    doc: &Value,
    index: usize,
    element_size: usize,
) -> Result<(usize, usize, usize), LevelError> {
    let acc = doc
        .get("accessors")
        .and_then(|a| a.get(index))
        .ok_or_else(|| schema("accessor out of range"))?;
    let count = acc
        .get("count")
        .and_then(|c| c.as_u64())
        .ok_or_else(|| schema("accessor without count"))? as usize;
    let view_index = acc
        .get("bufferView")
        .and_then(|v| v.as_u64())
        .ok_or_else(|| schema("accessor without bufferView"))? as usize;
    let acc_offset = acc.get("byteOffset").and_then(|v| v.as_u64()).unwrap_or(0) as usize;
    let view = doc
        .get("bufferViews")
        .and_then(|v| v.get(view_index))
        .ok_or_else(|| schema("bufferView out of range"))?;
    let view_offset = view.get("byteOffset").and_then(|v| v.as_u64()).unwrap_or(0) as usize;
    let stride = view
        .get("byteStride")
        .and_then(|v| v.as_u64())
        .map(|s| s as usize)
        .unwrap_or(element_size);
    Ok((view_offset + acc_offset, stride, count))
}

fn accessor_component_type(doc: &Value, index: usize) -> u64 {
    doc.get("accessors")
        .and_then(|a| a.get(index))
        .and_then(|acc| acc.get("componentType"))
        .and_then(|c| c.as_u64())
        .unwrap_or(0)
}

fn read_vec3_accessor(doc: &Value, bin: &[u8], index: usize) -> Result<Vec<[f32; 3]>, LevelError> {
    if accessor_component_type(doc, index) != COMPONENT_F32 {
        return Err(schema("expected float vec3 accessor"));
    }
    let (base, stride, count) = accessor_layout(doc, index, 12)?;
    if bin.is_empty() && count > 0 {
        return Err(LevelError::MissingBin);
    }
    let mut out = Vec::with_capacity(count);
    for i in 0..count {
        let at = base + i * stride;
        let b = bin.get(at..at + 12).ok_or(LevelError::Truncated)?;
        out.push([f32_le(b, 0), f32_le(b, 4), f32_le(b, 8)]);
    }
    Ok(out)
}

fn read_index_accessor(doc: &Value, bin: &[u8], index: usize) -> Result<Vec<u32>, LevelError> {
    let component = accessor_component_type(doc, index);
    let element_size = match component {
        COMPONENT_U8 => 1,
        COMPONENT_U16 => 2,
        COMPONENT_U32 => 4,
        _ => return Err(schema("unsupported index component type")),
    };
    let (base, stride, count) = accessor_layout(doc, index, element_size)?;
    if bin.is_empty() && count > 0 {
        return Err(LevelError::MissingBin);
    }
    let mut out = Vec::with_capacity(count);
    for i in 0..count {
        let at = base + i * stride;
        let b = bin
            .get(at..at + element_size)
            .ok_or(LevelError::Truncated)?;
        out.push(match component {
            COMPONENT_U8 => b[0] as u32,
            COMPONENT_U16 => u16::from_le_bytes([b[0], b[1]]) as u32,
            _ => u32::from_le_bytes([b[0], b[1], b[2], b[3]]),
        });
    }
    Ok(out)
}

fn bounds_from_accessor(doc: &Value, index: usize) -> Option<(Vec3, Vec3)> {
    let acc = doc.get("accessors").and_then(|a| a.get(index))?;
    let read = |key: &str| -> Option<Vec3> {
        let arr = acc.get(key)?.as_array()?;
        Some(Vec3::new(
            arr.first()?.as_f64()? as f32,
            arr.get(1)?.as_f64()? as f32,
            arr.get(2)?.as_f64()? as f32,
        ))
    };
    Some((read("min")?, read("max")?))
}

fn bounds_from_positions(positions: &[[f32; 3]]) -> (Vec3, Vec3) {
    let mut min = Vec3::splat(f32::INFINITY);
    let mut max = Vec3::splat(f32::NEG_INFINITY);
    for p in positions {
        min = min.min(Vec3::from_array(*p));
        max = max.max(Vec3::from_array(*p));
    }
    if positions.is_empty() {
        (Vec3::ZERO, Vec3::ZERO)
    } else {
        (min, max)
    }
}

fn node_translation(doc: &Value, mesh_index: usize) -> Vec3 {
    let nodes = match doc.get("nodes").and_then(|n| n.as_array()) {
        Some(nodes) => nodes,
        None => return Vec3::ZERO,
    };
    for node in nodes {
        if node.get("mesh").and_then(|m| m.as_u64()) != Some(mesh_index as u64) {
            continue;
        }
        if let Some(t) = node.get("translation").and_then(|t| t.as_array()) {
            let component = |i: usize| t.get(i).and_then(|v| v.as_f64()).unwrap_or(0.0) as f32;
            return Vec3::new(component(0), component(1), component(2));
        }
    }
    Vec3::ZERO
}

fn compute_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut accum = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        if a >= positions.len() || b >= positions.len() || c >= positions.len() {
            continue;
        }
        let pa = Vec3::from_array(positions[a]);
        let pb = Vec3::from_array(positions[b]);
        let pc = Vec3::from_array(positions[c]);
        let n = (pb - pa).cross(pc - pa);
        accum[a] += n;
        accum[b] += n;
        accum[c] += n;
    }
    accum
        .into_iter()
        .map(|n| {
            if n.length_squared() > 0.0 {
                n.normalize().to_array()
            } else {
                [0.0, 1.0, 0.0]
            }
        })
        .collect()
}

fn u32_le(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

fn f32_le(bytes: &[u8], offset: usize) -> f32 {
    f32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

/// Fetch and parse the level asset. Suspends the caller; the render loop
/// keeps running on whatever has already been constructed.
#[cfg(target_arch = "wasm32")]
pub async fn fetch_level(url: &str) -> Result<Level, LevelError> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    let window = web_sys::window().ok_or_else(|| LevelError::Fetch("no window".into()))?;
    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| LevelError::Fetch(format!("{e:?}")))?;
    let response: web_sys::Response = response
        .dyn_into()
        .map_err(|e| LevelError::Fetch(format!("{e:?}")))?;
    if !response.ok() {
        return Err(LevelError::Fetch(format!("HTTP {}", response.status())));
    }
    let buffer = JsFuture::from(
        response
            .array_buffer()
            .map_err(|e| LevelError::Fetch(format!("{e:?}")))?,
    )
    .await
    .map_err(|e| LevelError::Fetch(format!("{e:?}")))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    parse_glb(&bytes)
}
