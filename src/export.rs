//! Wavefront OBJ export with flat per-face normals.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::{ConvexHull3d, ObjOptions};

/// Writes the hull as OBJ text.
///
/// Every input point becomes a `v` line scaled by `options.scale`, including points
/// inside the hull, so face indices stay valid. Every face normal becomes a `vn`
/// line, and every face an `f` line with 1-based vertex indices that all reference
/// the normal of that face.
///
/// Coordinates use the shortest representation that round-trips, always with a
/// decimal point.
///
/// # Example
///
/// ```
/// use glam::DVec3;
/// use quickhull3d::{export::write_obj, ConvexHull3d, ObjOptions};
///
/// let points = [DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z];
/// let hull = ConvexHull3d::try_from_points(&points).unwrap();
///
/// let mut obj = Vec::new();
/// write_obj(&hull, &mut obj, &ObjOptions { scale: 1.0 }).unwrap();
///
/// let obj = String::from_utf8(obj).unwrap();
/// assert!(obj.starts_with("v 0.0 0.0 0.0\nv 1.0 0.0 0.0\n"));
/// assert!(obj.ends_with("f 2//4 3//4 4//4\n"));
/// ```
pub fn write_obj<W: Write>(
    hull: &ConvexHull3d,
    mut writer: W,
    options: &ObjOptions,
) -> io::Result<()> {
    for point in hull.points() {
        let p = *point * options.scale;
        writeln!(writer, "v {:?} {:?} {:?}", p.x, p.y, p.z)?;
    }

    for normal in hull.normals() {
        writeln!(writer, "vn {:?} {:?} {:?}", normal.x, normal.y, normal.z)?;
    }

    for (k, [a, b, c]) in hull.faces().iter().enumerate() {
        let k = k + 1;
        writeln!(
            writer,
            "f {}//{k} {}//{k} {}//{k}",
            a + 1,
            b + 1,
            c + 1
        )?;
    }

    writer.flush()
}

/// Writes the hull as OBJ text to the file at `path`, creating or truncating it.
///
/// See [`write_obj`] for the format.
pub fn save_obj(hull: &ConvexHull3d, path: impl AsRef<Path>, options: &ObjOptions) -> io::Result<()> {
    let file = File::create(path.as_ref())?;
    tracing::debug!(path = %path.as_ref().display(), faces = hull.faces().len(), "writing OBJ file");
    write_obj(hull, BufWriter::new(file), options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    fn tetrahedron() -> ConvexHull3d {
        let points = [
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
            DVec3::new(0.0, 0.0, 1.0),
        ];
        ConvexHull3d::try_from_points(&points).unwrap()
    }

    #[test]
    fn tetrahedron_obj() {
        let mut obj = Vec::new();
        write_obj(&tetrahedron(), &mut obj, &ObjOptions::default()).unwrap();

        let expected = "\
v 0.0 0.0 0.0
v 10.0 0.0 0.0
v 0.0 10.0 0.0
v 0.0 0.0 10.0
vn -0.0 -0.0 -1.0
vn 0.0 -1.0 0.0
vn -1.0 0.0 0.0
vn 0.5773502691896258 0.5773502691896258 0.5773502691896258
f 1//1 2//1 3//1
f 1//2 2//2 4//2
f 1//3 3//3 4//3
f 2//4 3//4 4//4
";
        assert_eq!(String::from_utf8(obj).unwrap(), expected);
    }

    #[test]
    fn interior_points_are_written() {
        let points = [
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
            DVec3::new(0.0, 0.0, 1.0),
            DVec3::new(0.25, 0.25, 0.25),
        ];
        let hull = ConvexHull3d::try_from_points(&points).unwrap();

        let mut obj = Vec::new();
        write_obj(&hull, &mut obj, &ObjOptions { scale: 2.0 }).unwrap();
        let obj = String::from_utf8(obj).unwrap();

        let lines: Vec<&str> = obj.lines().collect();
        assert_eq!(lines.iter().filter(|l| l.starts_with("v ")).count(), 5);
        assert_eq!(lines.iter().filter(|l| l.starts_with("vn ")).count(), 4);
        assert_eq!(lines.iter().filter(|l| l.starts_with("f ")).count(), 4);
        assert_eq!(lines[4], "v 0.5 0.5 0.5");
    }

    #[test]
    fn save_to_file() {
        let path = std::env::temp_dir().join(format!("quickhull3d-{}.obj", std::process::id()));
        save_obj(&tetrahedron(), &path, &ObjOptions::default()).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(contents.lines().count(), 12);
        assert!(contents.starts_with("v 0.0 0.0 0.0\n"));
    }
}
