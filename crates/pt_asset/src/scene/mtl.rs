use std::path::Path;

use gfx_maths::Vec3;
use log::debug;

use super::{
    document::SceneDocument,
    error::{FormatError, ParseError},
    reader::{parse_floats, read_directives},
};

// Part of the format, but the shader only consumes Ka, Kd and Ks.
const IGNORED_KEYWORDS: &[&str] = &[
    "Ns", "Ni", "d", "Tr", "Tf", "illum", "Ke", "map_Ka", "map_Kd", "map_Ks", "map_Ns", "map_d",
    "map_bump", "bump", "disp", "decal", "refl",
];

// Name of the material colour directives currently write into.
#[derive(Debug, Default)]
pub(super) struct MtlState {
    current_material: Option<String>,
}

// parses wavefront mtl (https://en.wikipedia.org/wiki/Wavefront_.obj_file#Material_template_library)
pub(super) fn parse(document: &mut SceneDocument, path: &Path) -> Result<(), ParseError> {
    let mut state = MtlState::default();

    read_directives(path, |line, keyword, operands| {
        parse_directive(document, &mut state, keyword, operands)
            .map_err(|err| ParseError::format(path, line, err))
    })
}

pub(super) fn parse_directive(
    document: &mut SceneDocument,
    state: &mut MtlState,
    keyword: &str,
    operands: &[&str],
) -> Result<(), FormatError> {
    match keyword {
        "newmtl" => {
            let name = operands
                .first()
                .ok_or_else(|| FormatError::missing(keyword, 1, 0))?;
            document.define_material(name);
            state.current_material = Some(name.to_string());
        }
        "Ka" | "Kd" | "Ks" => {
            let [r, g, b] = parse_floats::<3>(keyword, operands)?;
            let material = match state.current_material.as_deref() {
                Some(name) => document.materials.get_mut(name),
                None => None,
            }
            .ok_or_else(|| FormatError::NoActiveMaterial(keyword.into()))?;

            let colour = Vec3::new(r, g, b);
            match keyword {
                "Ka" => material.ka = colour,
                "Kd" => material.kd = colour,
                _ => material.ks = colour,
            }
        }
        _ if IGNORED_KEYWORDS.contains(&keyword) => {
            debug!("Material keyword \"{}\" is not used. Ignoring.", keyword)
        }
        _ => return Err(FormatError::UnknownKeyword(keyword.into())),
    };

    Ok(())
}
