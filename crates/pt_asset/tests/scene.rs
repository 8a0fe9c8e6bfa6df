use std::path::{Path, PathBuf};

use gfx_maths::Vec3;
use pt_asset::{
    pack, DocumentConfig, ErrorCategory, FormatError, ParseError, SceneDocument, SceneEncoder,
    SceneManifest,
};
use pt_format::{wire, SceneTextures};

fn data(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name)
}

fn cornell_config(emissive: bool) -> DocumentConfig {
    DocumentConfig {
        material_path: Some(data("cornell/mat.mtl")),
        emissive,
    }
}

#[test]
fn test_triangle_without_attributes() -> Result<(), ParseError> {
    let document = SceneDocument::load(&data("triangle.obj"), DocumentConfig::default())?;

    assert_eq!(document.positions().len(), 4);
    assert_eq!(document.submeshes().len(), 1);
    for corner in &document.submeshes()[0].faces[0].corners {
        assert_eq!(corner.texcoord, None);
        assert_eq!(corner.normal, None);
    }

    let data = SceneEncoder::new(&document).encode_geometry();
    assert_eq!(data.len(), wire::SUBMESH_HEADER_LEN + wire::FACE_LEN + 3);
    assert_eq!(data[0], wire::SUBMESH_BEGIN);
    assert!(data[15..33].iter().all(|x| *x == 0.0));
    assert_eq!(&data[33..], &wire::END_OF_STREAM);

    Ok(())
}

#[test]
fn test_cornell_merge() -> Result<(), ParseError> {
    let mut floor = SceneDocument::load(&data("cornell/floor.obj"), cornell_config(false))?;
    let left = SceneDocument::load(&data("cornell/left.obj"), cornell_config(false))?;
    let light = SceneDocument::load(&data("cornell/light.obj"), cornell_config(true))?;

    floor.merge(&left);
    floor.merge(&light);

    assert_eq!(floor.positions().len(), 12);
    assert_eq!(floor.texcoords().len(), 3);
    assert_eq!(floor.normals().len(), 2);
    assert_eq!(floor.face_count(), 6);

    let submeshes = floor.submeshes();
    let names: Vec<&str> = submeshes.iter().map(|s| s.material.as_str()).collect();
    assert_eq!(names, vec!["white", "red", "light"]);
    assert_eq!(
        submeshes.iter().map(|s| s.emissive).collect::<Vec<_>>(),
        vec![false, false, true]
    );

    // each contributed position index is its original index plus 4 per earlier file
    let left_face = &submeshes[1].faces[1];
    assert_eq!(
        left_face.corners.map(|c| c.position),
        [1 + 4, 3 + 4, 4 + 4]
    );
    assert!(left_face.corners.iter().all(|c| c.normal.is_none()));

    let light_face = &submeshes[2].faces[0];
    assert_eq!(light_face.corners.map(|c| c.position), [9, 10, 11]);
    assert_eq!(light_face.corners.map(|c| c.texcoord), [Some(1), Some(2), Some(3)]);
    assert_eq!(light_face.corners.map(|c| c.normal), [Some(2); 3]);
    assert_eq!(
        floor.positions()[8],
        Vec3::new(343.0, 548.7, 227.0)
    );

    let materials: Vec<&String> = floor.materials().keys().collect();
    assert_eq!(materials, vec!["light", "red", "white"]);
    assert_eq!(
        floor.material("red").map(|m| m.kd),
        Some(Vec3::new(0.63, 0.065, 0.05))
    );

    Ok(())
}

#[test]
fn test_cornell_textures() -> anyhow::Result<()> {
    let manifest = SceneManifest::parse(&data("cornell/cornell.toml"))?;
    assert_eq!(manifest.name, "cornellbox");

    let scene = pack::load(&manifest)?;
    let textures = pack::encode(&scene);

    // 3 headers + 6 faces + end marker = 183 floats = 61 texels
    assert_eq!(textures.geometry.side, 8);
    assert_eq!(textures.geometry.data.len(), 8 * 8 * 3);
    assert_eq!(
        &textures.geometry.data[120..123],
        &[wire::SUBMESH_BEGIN, wire::digest("light") as f32, 1.0]
    );
    assert_eq!(&textures.geometry.data[180..183], &wire::END_OF_STREAM);

    // 3 materials * 15 + end marker = 48 floats = 16 texels
    assert_eq!(textures.materials.side, 4);
    assert_eq!(textures.materials.data.len(), 48);
    assert_eq!(textures.materials.texel(1, 0), Some(&[0.0, 0.0, 0.0][..]));
    assert_eq!(
        textures.materials.texel(2, 0),
        Some(&[0.65, 0.65, 0.65][..])
    );

    Ok(())
}

#[test]
fn test_process_writes_packed_scene() -> anyhow::Result<()> {
    let output = Path::new(env!("CARGO_TARGET_TMPDIR")).join("pt_asset_process");
    let target = pack::process(&data("cornell/cornell.toml"), &output, false)?;

    assert_eq!(target, output.join("cornellbox.pts"));

    let manifest = SceneManifest::parse(&data("cornell/cornell.toml"))?;
    let expected = pack::encode(&pack::load(&manifest)?);
    assert_eq!(SceneTextures::from_file(&target)?, expected);

    Ok(())
}

#[test]
fn test_redefined_material_keeps_last() -> Result<(), ParseError> {
    let mut document = SceneDocument::default();
    document.parse_material(&data("redefine.mtl"))?;

    assert_eq!(document.materials().len(), 1);
    assert_eq!(
        document.material("X").map(|m| m.kd),
        Some(Vec3::new(0.25, 0.5, 0.75))
    );

    Ok(())
}

#[test]
fn test_long_geometry_line() {
    let mut document = SceneDocument::default();
    let error = document.parse(&data("long_line.obj")).unwrap_err();

    assert_eq!(error.category(), ErrorCategory::Format);
    assert_eq!(error.line(), Some(3));
    assert!(matches!(
        error.format_error(),
        Some(FormatError::LineTooLong { limit: 255, .. })
    ));
    // only the lines before the long one were applied
    assert_eq!(document.positions().len(), 2);
}

#[test]
fn test_long_material_line() {
    let config = DocumentConfig {
        material_path: Some(data("long_line.mtl")),
        emissive: false,
    };
    let mut document = SceneDocument::new(config);
    let error = document.parse(&data("long_material.obj")).unwrap_err();

    assert_eq!(error.category(), ErrorCategory::Format);
    assert_eq!(error.line(), Some(2));
    assert!(matches!(
        error.format_error(),
        Some(FormatError::LineTooLong { .. })
    ));
    assert_eq!(document.materials().len(), 1);
    assert!(document.material("red").is_none());
}

#[test]
fn test_material_not_configured() {
    let mut document = SceneDocument::default();
    let error = document.parse(&data("needs_material.obj")).unwrap_err();

    assert!(matches!(error, ParseError::MaterialNotConfigured { line: 2, .. }));
    assert_eq!(error.category(), ErrorCategory::Config);
    assert_eq!(document.positions().len(), 1);
}

#[test]
fn test_material_unreachable() {
    let config = DocumentConfig {
        material_path: Some(data("does_not_exist.mtl")),
        emissive: false,
    };
    let error = SceneDocument::load(&data("needs_material.obj"), config).unwrap_err();

    assert!(matches!(error, ParseError::Material { .. }));
    assert_eq!(error.category(), ErrorCategory::Config);
}

#[test]
fn test_unknown_keyword() {
    let error =
        SceneDocument::load(&data("unknown_keyword.obj"), DocumentConfig::default()).unwrap_err();

    assert_eq!(error.category(), ErrorCategory::Format);
    assert_eq!(error.line(), Some(4));
    assert_eq!(error.path(), data("unknown_keyword.obj"));
    assert!(matches!(
        error.format_error(),
        Some(FormatError::UnknownKeyword(keyword)) if keyword == "frobnicate"
    ));
}

#[test]
fn test_missing_file() {
    let error = SceneDocument::load(&data("nope.obj"), DocumentConfig::default()).unwrap_err();

    assert_eq!(error.category(), ErrorCategory::Io);
    assert_eq!(error.line(), None);
}

#[test]
fn test_invalid_utf8_is_format_error() {
    let mut document = SceneDocument::default();
    let error = document.parse(&data("latin1_comment.obj")).unwrap_err();

    assert_eq!(error.category(), ErrorCategory::Format);
    assert_eq!(error.line(), Some(2));
    assert_eq!(error.path(), data("latin1_comment.obj"));
    assert!(matches!(
        error.format_error(),
        Some(FormatError::InvalidEncoding(_))
    ));
    assert_eq!(document.positions().len(), 1);
}

#[test]
fn test_second_parse_appends() -> Result<(), ParseError> {
    let mut document = SceneDocument::default();
    document.parse(&data("triangle.obj"))?;
    document.parse(&data("triangle.obj"))?;

    assert_eq!(document.positions().len(), 8);
    assert_eq!(document.submeshes().len(), 2);
    assert_eq!(
        document.submeshes()[0].faces[0].corners.map(|c| c.position),
        [1, 2, 3]
    );
    assert_eq!(
        document.submeshes()[1].faces[0].corners.map(|c| c.position),
        [5, 6, 7]
    );

    // same result as loading twice and merging
    let mut merged = SceneDocument::load(&data("triangle.obj"), DocumentConfig::default())?;
    merged.merge(&SceneDocument::load(&data("triangle.obj"), DocumentConfig::default())?);
    assert_eq!(merged.submeshes(), document.submeshes());
    assert_eq!(merged.positions(), document.positions());

    Ok(())
}
