//! OBJ file parser for 3D models
//!
//! Parses Wavefront .obj text into an indexed [`Model`]: shared attribute
//! pools plus faces and polylines grouped into named parts. Triangulation
//! and buffer flattening happen later, in the mesh stage.
//!
//! Malformed or out-of-range records are dropped and reported through
//! [`Diagnostics`]; the parse itself never fails.

use crate::assets::Diagnostics;
use crate::foundation::math::Vec3;
use crate::render::material::MaterialTable;
use std::collections::HashMap;

/// One corner of a face: indices into the model's attribute pools.
///
/// Texture and normal references are optional in the OBJ grammar; absent
/// ones stay `None` and the mesh stage substitutes defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceVertex {
    /// Index into [`Model::positions`]
    pub position: usize,
    /// Index into [`Model::tex_coords`], if the corner carries one
    pub tex_coord: Option<usize>,
    /// Index into [`Model::normals`], if the corner carries one
    pub normal: Option<usize>,
}

/// A polygonal face with at least three corners, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    /// Corner references, in the winding order of the source file
    pub corners: Vec<FaceVertex>,
    /// Index into the material table active when the face was declared
    pub material: usize,
}

/// A polyline with at least two position references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polyline {
    /// Indices into [`Model::positions`]
    pub positions: Vec<usize>,
}

/// A named group of geometry from `o`/`g` statements.
#[derive(Debug, Clone, Default)]
pub struct Part {
    /// Part name; `"default"` for geometry before any `o`/`g`
    pub name: String,
    /// Faces in declaration order
    pub faces: Vec<Face>,
    /// Polylines in declaration order
    pub lines: Vec<Polyline>,
}

/// Indexed model data straight out of the parser.
#[derive(Debug, Clone, Default)]
pub struct Model {
    /// Position pool (`v` statements, file order)
    pub positions: Vec<Vec3>,
    /// Normal pool (`vn` statements, file order)
    pub normals: Vec<Vec3>,
    /// Texture coordinate pool (`vt` statements, file order)
    pub tex_coords: Vec<[f32; 2]>,
    /// Parts in first-seen order
    pub parts: Vec<Part>,
}

impl Model {
    /// True when at least one part carries a face or polyline.
    pub fn has_geometry(&self) -> bool {
        self.parts
            .iter()
            .any(|part| !part.faces.is_empty() || !part.lines.is_empty())
    }

    /// Total face count across all parts.
    pub fn face_count(&self) -> usize {
        self.parts.iter().map(|part| part.faces.len()).sum()
    }
}

/// Name of the part that collects geometry declared before any `o`/`g`.
pub const DEFAULT_PART_NAME: &str = "default";

/// OBJ text parser
pub struct ObjParser;

impl ObjParser {
    /// Parse OBJ text against an already-built material table.
    ///
    /// `usemtl` statements resolve by name against `materials`; an unknown
    /// name is reported and falls back to the table's index 0. The material
    /// pass must therefore run before this one.
    pub fn parse(contents: &str, materials: &MaterialTable, diagnostics: &mut Diagnostics) -> Model {
        let mut model = Model::default();
        let mut part_index_by_name: HashMap<String, usize> = HashMap::new();
        let mut current_part: Option<usize> = None;
        let mut current_material = 0;

        for (line_num, line) in contents.lines().enumerate() {
            let line = line.trim();
            let line_no = line_num + 1;

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            match parts[0] {
                "v" => {
                    if let Some(v) = Self::parse_vec3_fields(&parts, line_no, "v", diagnostics) {
                        model.positions.push(v);
                    }
                }

                "vn" => {
                    if let Some(v) = Self::parse_vec3_fields(&parts, line_no, "vn", diagnostics) {
                        model.normals.push(v);
                    }
                }

                "vt" => {
                    if let Some(uv) = Self::parse_uv_fields(&parts, line_no, diagnostics) {
                        model.tex_coords.push(uv);
                    }
                }

                "f" => {
                    if parts.len() < 4 {
                        diagnostics.report(line_no, "Face needs at least 3 vertices");
                        continue;
                    }

                    let mut corners = Vec::with_capacity(parts.len() - 1);
                    let mut valid = true;
                    for token in &parts[1..] {
                        match Self::parse_face_vertex(token, &model, line_no, diagnostics) {
                            Some(corner) => corners.push(corner),
                            None => {
                                valid = false;
                                break;
                            }
                        }
                    }
                    // One bad corner drops the whole face; partially kept
                    // faces would silently change the model's shape.
                    if valid {
                        let part = Self::active_part_mut(
                            &mut model,
                            &mut part_index_by_name,
                            &mut current_part,
                            DEFAULT_PART_NAME,
                        );
                        part.faces.push(Face {
                            corners,
                            material: current_material,
                        });
                    }
                }

                "l" => {
                    if parts.len() < 3 {
                        diagnostics.report(line_no, "Polyline needs at least 2 vertices");
                        continue;
                    }

                    let mut positions = Vec::with_capacity(parts.len() - 1);
                    let mut valid = true;
                    for token in &parts[1..] {
                        // Line tokens may carry a /vt suffix; only the
                        // position reference matters here.
                        let field = token.split('/').next().unwrap_or(token);
                        match Self::parse_index(
                            field,
                            model.positions.len(),
                            "position",
                            line_no,
                            diagnostics,
                        ) {
                            Some(index) => positions.push(index),
                            None => {
                                valid = false;
                                break;
                            }
                        }
                    }
                    if valid {
                        let part = Self::active_part_mut(
                            &mut model,
                            &mut part_index_by_name,
                            &mut current_part,
                            DEFAULT_PART_NAME,
                        );
                        part.lines.push(Polyline { positions });
                    }
                }

                "o" | "g" => {
                    let name = parts.get(1).copied().unwrap_or(DEFAULT_PART_NAME);
                    Self::switch_part(&mut model, &mut part_index_by_name, &mut current_part, name);
                }

                "usemtl" => match parts.get(1) {
                    Some(name) => match materials.index_of(name) {
                        Some(index) => current_material = index,
                        None => {
                            diagnostics.report(
                                line_no,
                                format!("usemtl names unknown material '{name}'; using default"),
                            );
                            current_material = 0;
                        }
                    },
                    None => diagnostics.report(line_no, "usemtl missing material name"),
                },

                // The host hands the MTL text in separately, and smoothing
                // groups do not affect flat-shaded output.
                "mtllib" | "s" => {}

                other => {
                    diagnostics.report(line_no, format!("Unknown OBJ keyword '{other}'"));
                }
            }
        }

        log::debug!(
            "Parsed OBJ: {} positions, {} normals, {} tex coords, {} part(s), {} face(s)",
            model.positions.len(),
            model.normals.len(),
            model.tex_coords.len(),
            model.parts.len(),
            model.face_count()
        );

        model
    }

    /// Part that receives the next face or polyline: the active one, or
    /// `fallback` (created on first use) when no `o`/`g` has run yet.
    fn active_part_mut<'a>(
        model: &'a mut Model,
        index_by_name: &mut HashMap<String, usize>,
        current: &mut Option<usize>,
        fallback: &str,
    ) -> &'a mut Part {
        match *current {
            Some(index) => &mut model.parts[index],
            None => Self::switch_part(model, index_by_name, current, fallback),
        }
    }

    /// Make `name` the active part, creating it on first mention and
    /// reusing the existing part when a name repeats.
    fn switch_part<'a>(
        model: &'a mut Model,
        index_by_name: &mut HashMap<String, usize>,
        current: &mut Option<usize>,
        name: &str,
    ) -> &'a mut Part {
        let index = match index_by_name.get(name) {
            Some(&index) => index,
            None => {
                let index = model.parts.len();
                model.parts.push(Part {
                    name: name.to_string(),
                    ..Default::default()
                });
                index_by_name.insert(name.to_string(), index);
                index
            }
        };
        *current = Some(index);
        &mut model.parts[index]
    }

    /// Parse three float fields following a keyword.
    fn parse_vec3_fields(
        parts: &[&str],
        line_no: usize,
        keyword: &str,
        diagnostics: &mut Diagnostics,
    ) -> Option<Vec3> {
        if parts.len() < 4 {
            diagnostics.report(line_no, format!("{keyword} needs 3 components"));
            return None;
        }
        let x = Self::parse_float(parts[1], keyword, line_no, diagnostics)?;
        let y = Self::parse_float(parts[2], keyword, line_no, diagnostics)?;
        let z = Self::parse_float(parts[3], keyword, line_no, diagnostics)?;
        Some(Vec3::new(x, y, z))
    }

    /// Parse the two float fields of a `vt` statement.
    fn parse_uv_fields(
        parts: &[&str],
        line_no: usize,
        diagnostics: &mut Diagnostics,
    ) -> Option<[f32; 2]> {
        if parts.len() < 3 {
            diagnostics.report(line_no, "vt needs 2 components");
            return None;
        }
        let u = Self::parse_float(parts[1], "vt", line_no, diagnostics)?;
        let v = Self::parse_float(parts[2], "vt", line_no, diagnostics)?;
        Some([u, v])
    }

    fn parse_float(
        token: &str,
        keyword: &str,
        line_no: usize,
        diagnostics: &mut Diagnostics,
    ) -> Option<f32> {
        match token.parse::<f32>() {
            Ok(value) => Some(value),
            Err(_) => {
                diagnostics.report(
                    line_no,
                    format!("{keyword} has invalid float value '{token}'"),
                );
                None
            }
        }
    }

    /// Parse one `v[/vt][/vn]` face corner token, validating every index
    /// against the pools declared so far.
    fn parse_face_vertex(
        token: &str,
        model: &Model,
        line_no: usize,
        diagnostics: &mut Diagnostics,
    ) -> Option<FaceVertex> {
        let fields: Vec<&str> = token.split('/').collect();
        if fields.len() > 3 {
            diagnostics.report(line_no, format!("Malformed face vertex '{token}'"));
            return None;
        }

        let position = Self::parse_index(
            fields[0],
            model.positions.len(),
            "position",
            line_no,
            diagnostics,
        )?;

        let tex_coord = match fields.get(1) {
            Some(field) if !field.is_empty() => Some(Self::parse_index(
                field,
                model.tex_coords.len(),
                "texture coordinate",
                line_no,
                diagnostics,
            )?),
            _ => None,
        };

        let normal = match fields.get(2) {
            Some(field) if !field.is_empty() => Some(Self::parse_index(
                field,
                model.normals.len(),
                "normal",
                line_no,
                diagnostics,
            )?),
            _ => None,
        };

        Some(FaceVertex {
            position,
            tex_coord,
            normal,
        })
    }

    /// Parse a 1-based pool index and convert it to 0-based.
    ///
    /// Negative (relative) references are a deliberately unsupported input
    /// class; they are reported rather than misread.
    fn parse_index(
        field: &str,
        pool_len: usize,
        what: &str,
        line_no: usize,
        diagnostics: &mut Diagnostics,
    ) -> Option<usize> {
        let value = match field.parse::<i64>() {
            Ok(value) => value,
            Err(_) => {
                diagnostics.report(line_no, format!("Invalid {what} index '{field}'"));
                return None;
            }
        };

        if value < 0 {
            diagnostics.report(
                line_no,
                format!("Negative {what} index {value} is not supported"),
            );
            return None;
        }
        if value == 0 || value as usize > pool_len {
            diagnostics.report(
                line_no,
                format!("{what} index {value} is outside the declared pool of {pool_len}"),
            );
            return None;
        }

        Some(value as usize - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(contents: &str) -> (Model, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let model = ObjParser::parse(contents, &MaterialTable::new(), &mut diagnostics);
        (model, diagnostics)
    }

    const TRIANGLE: &str = "\
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 1.0 1.0 0.0
f 1 2 3
";

    #[test]
    fn test_parse_minimal_triangle() {
        let (model, diagnostics) = parse(TRIANGLE);
        assert!(diagnostics.is_empty());

        assert_eq!(model.positions.len(), 3);
        assert_eq!(model.parts.len(), 1);
        assert_eq!(model.parts[0].name, DEFAULT_PART_NAME);

        let face = &model.parts[0].faces[0];
        assert_eq!(face.material, 0);
        assert_eq!(
            face.corners,
            vec![
                FaceVertex { position: 0, tex_coord: None, normal: None },
                FaceVertex { position: 1, tex_coord: None, normal: None },
                FaceVertex { position: 2, tex_coord: None, normal: None },
            ]
        );
    }

    #[test]
    fn test_parse_face_with_full_references() {
        let src = "\
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 1.0 1.0 0.0
vt 0.0 0.0
vt 1.0 0.0
vt 1.0 1.0
vn 0.0 0.0 1.0
f 1/1/1 2/2/1 3/3/1
";
        let (model, diagnostics) = parse(src);
        assert!(diagnostics.is_empty());

        let face = &model.parts[0].faces[0];
        assert_eq!(
            face.corners[1],
            FaceVertex {
                position: 1,
                tex_coord: Some(1),
                normal: Some(0)
            }
        );
    }

    #[test]
    fn test_parse_face_with_partial_references() {
        let src = "\
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 1.0 1.0 0.0
vn 0.0 0.0 1.0
f 1//1 2//1 3//1
";
        let (model, diagnostics) = parse(src);
        assert!(diagnostics.is_empty());

        let corner = model.parts[0].faces[0].corners[0];
        assert_eq!(corner.tex_coord, None);
        assert_eq!(corner.normal, Some(0));
    }

    #[test]
    fn test_quad_face_keeps_all_four_corners() {
        let src = "\
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 1.0 1.0 0.0
v 0.0 1.0 0.0
f 1 2 3 4
";
        let (model, _) = parse(src);
        assert_eq!(model.parts[0].faces[0].corners.len(), 4);
    }

    #[test]
    fn test_objects_split_parts_and_reuse_by_name() {
        let src = "\
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 1.0 1.0 0.0
o hull
f 1 2 3
o mast
f 1 2 3
o hull
f 3 2 1
";
        let (model, diagnostics) = parse(src);
        assert!(diagnostics.is_empty());

        assert_eq!(model.parts.len(), 2);
        assert_eq!(model.parts[0].name, "hull");
        assert_eq!(model.parts[0].faces.len(), 2);
        assert_eq!(model.parts[1].name, "mast");
        assert_eq!(model.parts[1].faces.len(), 1);
    }

    #[test]
    fn test_geometry_lands_in_the_active_part() {
        let src = "\
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 1.0 1.0 0.0
o hull
f 1 2 3
l 1 2
";
        let (model, diagnostics) = parse(src);
        assert!(diagnostics.is_empty());

        // The named part takes the geometry; no fallback part appears.
        assert_eq!(model.parts.len(), 1);
        assert_eq!(model.parts[0].name, "hull");
        assert_eq!(model.parts[0].faces.len(), 1);
        assert_eq!(model.parts[0].lines.len(), 1);
    }

    #[test]
    fn test_group_statement_behaves_like_object() {
        let src = "\
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 1.0 1.0 0.0
g wing
f 1 2 3
";
        let (model, _) = parse(src);
        assert_eq!(model.parts[0].name, "wing");
    }

    #[test]
    fn test_usemtl_selects_material_for_following_faces() {
        let mut materials = MaterialTable::new();
        materials.insert(crate::render::material::Material {
            name: "steel".to_string(),
            ..Default::default()
        });

        let src = "\
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 1.0 1.0 0.0
f 1 2 3
usemtl steel
f 3 2 1
";
        let mut diagnostics = Diagnostics::new();
        let model = ObjParser::parse(src, &materials, &mut diagnostics);

        assert!(diagnostics.is_empty());
        assert_eq!(model.parts[0].faces[0].material, 0);
        assert_eq!(model.parts[0].faces[1].material, 1);
    }

    #[test]
    fn test_usemtl_with_unknown_name_reports_and_uses_default() {
        let src = "\
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 1.0 1.0 0.0
usemtl ghost
f 1 2 3
";
        let (model, diagnostics) = parse(src);

        assert_eq!(model.parts[0].faces[0].material, 0);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics.entries()[0].message.contains("ghost"));
    }

    #[test]
    fn test_face_with_out_of_range_index_is_dropped() {
        let src = "\
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 1.0 1.0 0.0
f 1 2 9
f 1 2 3
";
        let (model, diagnostics) = parse(src);

        assert_eq!(model.parts[0].faces.len(), 1);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics.entries()[0].message.contains("outside the declared pool"));
    }

    #[test]
    fn test_negative_index_is_reported_not_misread() {
        let src = "\
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 1.0 1.0 0.0
f 1 2 -1
";
        let (model, diagnostics) = parse(src);

        assert!(model.parts.is_empty() || model.parts[0].faces.is_empty());
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics.entries()[0].message.contains("not supported"));
    }

    #[test]
    fn test_polylines_are_collected_per_part() {
        let src = "\
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 1.0 1.0 0.0
l 1 2 3
";
        let (model, diagnostics) = parse(src);
        assert!(diagnostics.is_empty());

        let line = &model.parts[0].lines[0];
        assert_eq!(line.positions, vec![0, 1, 2]);
    }

    #[test]
    fn test_malformed_position_line_is_skipped() {
        let src = "\
v 0.0 oops 0.0
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 1.0 1.0 0.0
f 1 2 3
";
        let (model, diagnostics) = parse(src);

        assert_eq!(model.positions.len(), 3);
        assert_eq!(model.parts[0].faces.len(), 1);
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_known_ignored_keywords_stay_silent() {
        let src = "\
mtllib scene.mtl
s off
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 1.0 1.0 0.0
f 1 2 3
";
        let (_, diagnostics) = parse(src);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_unknown_keyword_is_reported() {
        let (_, diagnostics) = parse("curv 0.1 0.2\n");
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics.entries()[0].message.contains("curv"));
    }

    #[test]
    fn test_face_with_too_few_corners_is_reported() {
        let src = "\
v 0.0 0.0 0.0
v 1.0 0.0 0.0
f 1 2
";
        let (model, diagnostics) = parse(src);
        assert!(!model.has_geometry());
        assert_eq!(diagnostics.len(), 1);
    }
}
