use std::path::Path;

use gfx_maths::Vec3;
use log::{debug, warn};

use super::{
    document::{Corner, Face, IndexOffsets, SceneDocument},
    error::{FormatError, ParseError},
    reader::{parse_float, parse_floats, read_directives},
};

// Wavefront keywords that are part of the format but carry nothing this
// layout can express. They are skipped with a warning instead of failing.
const UNSUPPORTED_KEYWORDS: &[&str] = &[
    "vp", "deg", "bmat", "step", "cstype", "p", "l", "curv", "curv2", "surf", "parm", "trim",
    "hole", "scrv", "sp", "end", "con", "mg", "bevel", "c_interp", "d_interp", "lod",
    "shadow_obj", "trace_obj", "ctech", "stech",
];

// The submesh faces are appended to, `None` until the first `usemtl` or face.
// `base` is what the document held before this file.
#[derive(Debug, Default)]
pub(super) struct ObjState {
    current_submesh: Option<usize>,
    base: IndexOffsets,
}

// parses wavefront obj (https://en.wikipedia.org/wiki/Wavefront_.obj_file)
// only triangles are accepted, everything unknown aborts the load
pub(super) fn parse(document: &mut SceneDocument, path: &Path) -> Result<(), ParseError> {
    let mut state = ObjState {
        current_submesh: None,
        base: document.pool_offsets(),
    };

    read_directives(path, |line, keyword, operands| match keyword {
        "mtllib" => document.load_material_library(path, line),
        _ => parse_directive(document, &mut state, keyword, operands)
            .map_err(|err| ParseError::format(path, line, err)),
    })
}

pub(super) fn parse_directive(
    document: &mut SceneDocument,
    state: &mut ObjState,
    keyword: &str,
    operands: &[&str],
) -> Result<(), FormatError> {
    match keyword {
        // vertex
        "v" => document.positions.push(parse_vec3(keyword, operands)?),
        // texture coordinates
        "vt" => document.texcoords.push(parse_texcoord(operands)?),
        // vertex normals
        "vn" => document.normals.push(parse_vec3(keyword, operands)?),
        // material
        "usemtl" => {
            let name = operands
                .first()
                .ok_or_else(|| FormatError::missing(keyword, 1, 0))?;
            state.current_submesh = Some(document.open_submesh(name));
        }
        "f" => {
            let face = parse_face(operands)?;
            let face = Face {
                corners: face.corners.map(|corner| corner.shifted(state.base)),
            };
            document.check_face(&face)?;

            let index = *state
                .current_submesh
                .get_or_insert_with(|| document.open_default_submesh());
            document.submeshes[index].faces.push(face);
        }
        // name and group
        "o" | "g" => debug!("Groups are not modelled. Ignoring \"{}\".", keyword),
        // smoothing groups
        "s" => debug!("Smoothing groups not supported. Ignoring."),
        _ if UNSUPPORTED_KEYWORDS.contains(&keyword) => {
            warn!("Keyword \"{}\" is not supported. Ignoring.", keyword)
        }
        _ => return Err(FormatError::UnknownKeyword(keyword.into())),
    };

    Ok(())
}

fn parse_vec3(directive: &str, operands: &[&str]) -> Result<Vec3, FormatError> {
    let [x, y, z] = parse_floats::<3>(directive, operands)?;
    Ok(Vec3::new(x, y, z))
}

// the third component is optional in the format and defaults to 0
fn parse_texcoord(operands: &[&str]) -> Result<Vec3, FormatError> {
    let [u, v] = parse_floats::<2>("vt", operands)?;
    let w = operands
        .get(2)
        .map(|token| parse_float(token))
        .transpose()?
        .unwrap_or(0.0);
    Ok(Vec3::new(u, v, w))
}

fn parse_face(operands: &[&str]) -> Result<Face, FormatError> {
    if operands.len() != 3 {
        return Err(FormatError::UnsupportedPolygon(operands.len()));
    }

    Ok(Face {
        corners: [
            parse_corner(operands[0])?,
            parse_corner(operands[1])?,
            parse_corner(operands[2])?,
        ],
    })
}

// parses `v`, `v/t`, `v//n` or `v/t/n`
fn parse_corner(token: &str) -> Result<Corner, FormatError> {
    let (position, texcoord, normal) = match (token.find('/'), token.rfind('/')) {
        (Some(first), Some(last)) if first == last => {
            (&token[..first], Some(&token[first + 1..]), None)
        }
        (Some(first), Some(last)) if first + 1 == last => {
            (&token[..first], None, Some(&token[last + 1..]))
        }
        (Some(first), Some(last)) => (
            &token[..first],
            Some(&token[first + 1..last]),
            Some(&token[last + 1..]),
        ),
        _ => (token, None, None),
    };

    Ok(Corner {
        position: parse_index(token, position)?,
        texcoord: texcoord.map(|x| parse_index(token, x)).transpose()?,
        normal: normal.map(|x| parse_index(token, x)).transpose()?,
    })
}

fn parse_index(corner: &str, value: &str) -> Result<u32, FormatError> {
    let index: u32 = value.parse().map_err(|source| FormatError::InvalidIndex {
        token: corner.into(),
        source,
    })?;

    if index == 0 {
        return Err(FormatError::ZeroIndex(corner.into()));
    }
    Ok(index)
}
