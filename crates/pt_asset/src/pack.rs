//! Turns a scene manifest into a `.pts` file.

use anyhow::{Context, Result};
use log::info;
use pt_format::{SceneTextures, TextureData};
use std::{
    io,
    path::{Path, PathBuf},
};

use crate::{
    manifest::SceneManifest,
    scene::{SceneDocument, SceneEncoder},
    utils,
};

/// Extension of packed scene files.
pub const EXTENSION: &str = "pts";

/// Loads every object of the manifest and merges them into the first one.
pub fn load(manifest: &SceneManifest) -> Result<SceneDocument> {
    let mut documents = manifest.documents();
    let (path, config) = documents
        .next()
        .with_context(|| format!("Scene \"{}\" has no objects", manifest.name))?;

    let mut scene = SceneDocument::load(path, config)?;
    for (path, config) in documents {
        let document = SceneDocument::load(path, config)?;
        scene.merge(&document);
    }

    info!(
        "Scene \"{}\": {} submeshes, {} faces, {} materials",
        manifest.name,
        scene.submeshes().len(),
        scene.face_count(),
        scene.materials().len()
    );
    Ok(scene)
}

pub fn encode(scene: &SceneDocument) -> SceneTextures {
    SceneEncoder::new(scene).textures()
}

fn save(name: &str, output_dir: &Path, textures: &SceneTextures) -> Result<PathBuf> {
    let target = utils::combine_path(output_dir, name, EXTENSION);
    let data = textures
        .to_bytes()
        .context("Could not serialize SceneTextures")?;
    utils::write_file(&target, &data)?;
    Ok(target)
}

/// Writes the texture as a table: one line per row, texel and channel
/// indices as headers.
pub fn print_texture<W: io::Write>(
    out: &mut W,
    label: &str,
    texture: &TextureData,
) -> io::Result<()> {
    let channels = texture.channels as usize;

    writeln!(out, "{} ({1}x{1})", label, texture.side)?;
    write!(out, "   ")?;
    for x in 0..texture.side {
        write!(out, "{:<width$}", x, width = 7 * channels)?;
    }
    writeln!(out)?;

    write!(out, "   ")?;
    for i in 0..texture.row_len() {
        write!(out, "{:<7}", i)?;
    }
    writeln!(out)?;
    writeln!(out)?;

    for (y, row) in texture.rows().enumerate() {
        write!(out, "{:<3}", y)?;
        for value in row {
            write!(out, "{:<7}", value)?;
        }
        writeln!(out)?;
    }
    writeln!(out)
}

/// Loads, merges, encodes and saves the scene described by `manifest_path`.
pub fn process(manifest_path: &Path, output_dir: &Path, print: bool) -> Result<PathBuf> {
    info!("Processing scene manifest: `{}`", manifest_path.display());
    let manifest = SceneManifest::parse(manifest_path)
        .with_context(|| format!("Could not load {}", manifest_path.display()))?;

    let scene = load(&manifest)?;
    let textures = encode(&scene);
    if print {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        print_texture(&mut out, "geometry", &textures.geometry)
            .and_then(|_| print_texture(&mut out, "materials", &textures.materials))
            .context("Could not print textures")?;
    }

    let target = save(&manifest.name, output_dir, &textures)?;
    info!("Wrote {}", target.display());
    Ok(target)
}

#[cfg(test)]
mod test {
    use super::*;
    use pt_format::RGB_CHANNELS;

    fn dump(label: &str, texture: &TextureData) -> String {
        let mut out = Vec::new();
        print_texture(&mut out, label, texture).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_print_texture() {
        let mut stream: Vec<f32> = (0..10).map(|x| x as f32).collect();
        stream.extend_from_slice(&[0.5, -1.25]);
        let texture = TextureData::from_stream(stream, RGB_CHANNELS);

        assert_eq!(
            dump("geometry", &texture),
            concat!(
                "geometry (2x2)\n",
                "   0                    1                    \n",
                "   0      1      2      3      4      5      \n",
                "\n",
                "0  0      1      2      3      4      5      \n",
                "1  6      7      8      9      0.5    -1.25  \n",
                "\n",
            )
        );
    }

    #[test]
    fn test_print_empty_texture() {
        let texture = TextureData::from_stream(Vec::new(), RGB_CHANNELS);

        assert_eq!(dump("materials", &texture), "materials (0x0)\n   \n   \n\n\n");
    }
}
