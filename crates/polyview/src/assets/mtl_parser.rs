//! MTL (Material Template Library) file parser
//!
//! Parses Wavefront .mtl text into an ordered [`MaterialTable`]. Supports
//! the standard Phong lighting properties and common texture maps. Content
//! problems never abort the parse; they are recorded as diagnostics and
//! the offending statement is skipped.

use crate::assets::Diagnostics;
use crate::foundation::math::Vec3;
use crate::render::material::{IlluminationModel, Material, MaterialTable};

/// MTL file parser
pub struct MtlParser;

impl MtlParser {
    /// Parse MTL text into a material table.
    ///
    /// `texture_names` lists the texture file names the host application
    /// has available, in binding order; `map_*` statements resolve against
    /// it by bare file name (directories stripped). The returned table
    /// always carries the synthetic fallback material at index 0, with
    /// parsed materials following in declaration order.
    pub fn parse(
        contents: &str,
        texture_names: &[String],
        diagnostics: &mut Diagnostics,
    ) -> MaterialTable {
        let mut table = MaterialTable::new();
        let mut current_material: Option<Material> = None;

        for (line_num, line) in contents.lines().enumerate() {
            let line = line.trim();
            let line_no = line_num + 1;

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut tokens = line.split_whitespace();
            let command = match tokens.next() {
                Some(cmd) => cmd,
                None => continue,
            };

            if command == "newmtl" {
                // Save previous material if exists
                if let Some(mat) = current_material.take() {
                    table.insert(mat);
                }

                match tokens.next() {
                    Some(name) => {
                        if table.index_of(name).is_some() {
                            diagnostics.report(
                                line_no,
                                format!("Material '{name}' re-declared; replacing the earlier definition"),
                            );
                        }
                        current_material = Some(Material {
                            name: name.to_string(),
                            ..Default::default()
                        });
                    }
                    None => diagnostics.report(line_no, "newmtl missing material name"),
                }
                continue;
            }

            let mat = match current_material.as_mut() {
                Some(mat) => mat,
                None => {
                    diagnostics.report(
                        line_no,
                        format!("'{command}' statement before any newmtl"),
                    );
                    continue;
                }
            };

            match command {
                "Ka" => {
                    if let Some(v) = Self::parse_vec3(&mut tokens, line_no, "Ka", diagnostics) {
                        mat.ambient = v;
                    }
                }

                "Kd" => {
                    if let Some(v) = Self::parse_vec3(&mut tokens, line_no, "Kd", diagnostics) {
                        mat.diffuse = v;
                    }
                }

                "Ks" => {
                    if let Some(v) = Self::parse_vec3(&mut tokens, line_no, "Ks", diagnostics) {
                        mat.specular = v;
                    }
                }

                "Ke" => {
                    if let Some(v) = Self::parse_vec3(&mut tokens, line_no, "Ke", diagnostics) {
                        mat.emission = v;
                    }
                }

                "Ns" => {
                    if let Some(v) = Self::parse_f32(&mut tokens, line_no, "Ns", diagnostics) {
                        mat.shininess = v;
                    }
                }

                "Ni" => {
                    if let Some(v) = Self::parse_f32(&mut tokens, line_no, "Ni", diagnostics) {
                        mat.refraction_index = v;
                    }
                }

                "Tf" => {
                    if let Some(v) = Self::parse_vec3(&mut tokens, line_no, "Tf", diagnostics) {
                        mat.transmission_filter = v;
                    }
                }

                "d" => {
                    if let Some(v) = Self::parse_f32(&mut tokens, line_no, "d", diagnostics) {
                        mat.alpha = v;
                    }
                }

                "Tr" => {
                    // Transparency is inverted opacity: alpha = 1.0 - Tr.
                    // Whichever of d / Tr comes last wins.
                    if let Some(v) = Self::parse_f32(&mut tokens, line_no, "Tr", diagnostics) {
                        mat.alpha = 1.0 - v;
                    }
                }

                "illum" => {
                    if let Some(v) = Self::parse_u32(&mut tokens, line_no, "illum", diagnostics) {
                        mat.illumination = IlluminationModel::from_mtl(v);
                    }
                }

                "map_Ka" => {
                    mat.maps.ambient =
                        Self::parse_map(&mut tokens, line_no, "map_Ka", texture_names, diagnostics);
                }

                "map_Kd" => {
                    mat.maps.diffuse =
                        Self::parse_map(&mut tokens, line_no, "map_Kd", texture_names, diagnostics);
                }

                "map_Ks" => {
                    mat.maps.specular =
                        Self::parse_map(&mut tokens, line_no, "map_Ks", texture_names, diagnostics);
                }

                "map_Bump" | "bump" => {
                    mat.maps.normal =
                        Self::parse_map(&mut tokens, line_no, command, texture_names, diagnostics);
                }

                "map_Ns" => {
                    mat.maps.shininess =
                        Self::parse_map(&mut tokens, line_no, "map_Ns", texture_names, diagnostics);
                }

                "map_Ke" => {
                    mat.maps.emission =
                        Self::parse_map(&mut tokens, line_no, "map_Ke", texture_names, diagnostics);
                }

                _ => diagnostics.report(line_no, format!("Unknown MTL keyword '{command}'")),
            }
        }

        // Save final material
        if let Some(mat) = current_material {
            table.insert(mat);
        }

        table
    }

    /// Parse a Vec3 color from RGB tokens
    fn parse_vec3<'a, I>(
        tokens: &mut I,
        line_no: usize,
        command: &str,
        diagnostics: &mut Diagnostics,
    ) -> Option<Vec3>
    where
        I: Iterator<Item = &'a str>,
    {
        let r = Self::parse_f32(tokens, line_no, command, diagnostics)?;
        let g = Self::parse_f32(tokens, line_no, command, diagnostics)?;
        let b = Self::parse_f32(tokens, line_no, command, diagnostics)?;
        Some(Vec3::new(r, g, b))
    }

    /// Parse a single f32 value
    fn parse_f32<'a, I>(
        tokens: &mut I,
        line_no: usize,
        command: &str,
        diagnostics: &mut Diagnostics,
    ) -> Option<f32>
    where
        I: Iterator<Item = &'a str>,
    {
        let token = match tokens.next() {
            Some(token) => token,
            None => {
                diagnostics.report(line_no, format!("{command} missing value"));
                return None;
            }
        };
        match token.parse::<f32>() {
            Ok(value) => Some(value),
            Err(_) => {
                diagnostics.report(line_no, format!("{command} invalid float value '{token}'"));
                None
            }
        }
    }

    /// Parse a single u32 value
    fn parse_u32<'a, I>(
        tokens: &mut I,
        line_no: usize,
        command: &str,
        diagnostics: &mut Diagnostics,
    ) -> Option<u32>
    where
        I: Iterator<Item = &'a str>,
    {
        let token = match tokens.next() {
            Some(token) => token,
            None => {
                diagnostics.report(line_no, format!("{command} missing value"));
                return None;
            }
        };
        match token.parse::<u32>() {
            Ok(value) => Some(value),
            Err(_) => {
                diagnostics.report(line_no, format!("{command} invalid integer value '{token}'"));
                None
            }
        }
    }

    /// Parse a texture map statement and resolve it against the host's
    /// texture list. Unresolved names are reported and leave the slot
    /// unmapped.
    fn parse_map<'a, I>(
        tokens: &mut I,
        line_no: usize,
        command: &str,
        texture_names: &[String],
        diagnostics: &mut Diagnostics,
    ) -> Option<usize>
    where
        I: Iterator<Item = &'a str>,
    {
        // Collect remaining tokens; texture paths can contain spaces
        let path: Vec<&str> = tokens.collect();
        if path.is_empty() {
            diagnostics.report(line_no, format!("{command} missing texture path"));
            return None;
        }
        let path = path.join(" ");

        // Strip any directory prefix, accepting both separator styles
        let file_name = path.rsplit(['/', '\\']).next().unwrap_or(&path);

        let index = texture_names.iter().position(|name| name == file_name);
        if index.is_none() {
            diagnostics.report(
                line_no,
                format!("{command} names texture '{file_name}' which is not among the provided textures"),
            );
        }
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(contents: &str, texture_names: &[String]) -> (MaterialTable, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let table = MtlParser::parse(contents, texture_names, &mut diagnostics);
        (table, diagnostics)
    }

    #[test]
    fn test_parse_simple_material() {
        let mtl_content = r#"
# Simple material
newmtl TestMaterial
Ka 1.0 1.0 1.0
Kd 0.8 0.2 0.2
Ks 0.5 0.5 0.5
Ns 250.0
Ni 1.45
d 1.0
illum 2
"#;

        let (table, diagnostics) = parse(mtl_content, &[]);
        assert!(diagnostics.is_empty());
        assert_eq!(table.len(), 2);

        let (index, mat) = table.get("TestMaterial").unwrap();
        assert_eq!(index, 1);
        assert_eq!(mat.diffuse, Vec3::new(0.8, 0.2, 0.2));
        assert_eq!(mat.shininess, 250.0);
        assert_eq!(mat.refraction_index, 1.45);
        assert_eq!(mat.alpha, 1.0);
        assert_eq!(mat.illumination, IlluminationModel::Phong);
    }

    #[test]
    fn test_parse_material_with_textures() {
        let mtl_content = r#"
newmtl TexturedMaterial
Kd 1.0 1.0 1.0
map_Kd textures/diffuse.png
map_Bump textures\normal.png
map_Ke emission.png
"#;
        let names = vec![
            "diffuse.png".to_string(),
            "normal.png".to_string(),
            "emission.png".to_string(),
        ];

        let (table, diagnostics) = parse(mtl_content, &names);
        assert!(diagnostics.is_empty());

        let (_, mat) = table.get("TexturedMaterial").unwrap();
        assert_eq!(mat.maps.diffuse, Some(0));
        assert_eq!(mat.maps.normal, Some(1));
        assert_eq!(mat.maps.emission, Some(2));
        assert_eq!(mat.maps.specular, None);
    }

    #[test]
    fn test_unresolved_texture_leaves_slot_unmapped() {
        let mtl_content = "newmtl M\nmap_Kd missing.png\n";
        let (table, diagnostics) = parse(mtl_content, &["present.png".to_string()]);

        let (_, mat) = table.get("M").unwrap();
        assert_eq!(mat.maps.diffuse, None);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics.entries()[0].message.contains("missing.png"));
    }

    #[test]
    fn test_parse_multiple_materials_in_declaration_order() {
        let mtl_content = r#"
newmtl Material1
Kd 1.0 0.0 0.0

newmtl Material2
Kd 0.0 1.0 0.0
"#;

        let (table, diagnostics) = parse(mtl_content, &[]);
        assert!(diagnostics.is_empty());
        assert_eq!(table.len(), 3);

        assert_eq!(table.index_of("Material1"), Some(1));
        assert_eq!(table.index_of("Material2"), Some(2));
        assert_eq!(table.by_index(1).unwrap().diffuse, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(table.by_index(2).unwrap().diffuse, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_parse_transparency() {
        let mtl_content = r#"
newmtl TransparentMat
Tr 0.3
"#;

        let (table, _) = parse(mtl_content, &[]);
        let (_, mat) = table.get("TransparentMat").unwrap();

        // Tr = 1.0 - alpha, so Tr 0.3 means alpha = 0.7
        assert!((mat.alpha - 0.7).abs() < 0.001);
    }

    #[test]
    fn test_last_of_d_and_tr_wins() {
        let (table, _) = parse("newmtl A\nd 0.9\nTr 0.4\n", &[]);
        let (_, mat) = table.get("A").unwrap();
        assert!((mat.alpha - 0.6).abs() < 0.001);

        let (table, _) = parse("newmtl B\nTr 0.4\nd 0.9\n", &[]);
        let (_, mat) = table.get("B").unwrap();
        assert!((mat.alpha - 0.9).abs() < 0.001);
    }

    #[test]
    fn test_parse_emission() {
        let mtl_content = r#"
newmtl EmissiveMat
Ke 0.2 0.6 1.0
"#;

        let (table, _) = parse(mtl_content, &[]);
        let (_, mat) = table.get("EmissiveMat").unwrap();
        assert_eq!(mat.emission, Vec3::new(0.2, 0.6, 1.0));
    }

    #[test]
    fn test_parse_transmission_filter() {
        let mtl_content = r#"
newmtl Glass
Ni 1.5
Tf 0.9 1.0 0.8
"#;

        let (table, diagnostics) = parse(mtl_content, &[]);
        assert!(diagnostics.is_empty());
        let (_, mat) = table.get("Glass").unwrap();
        assert_eq!(mat.transmission_filter, Vec3::new(0.9, 1.0, 0.8));

        // Without Tf the filter stays at the pass-through default.
        let (table, _) = parse("newmtl Plain\n", &[]);
        let (_, mat) = table.get("Plain").unwrap();
        assert_eq!(mat.transmission_filter, Vec3::one());
    }

    #[test]
    fn test_property_before_newmtl_is_reported_and_skipped() {
        let (table, diagnostics) = parse("Kd 1.0 0.0 0.0\nnewmtl Late\n", &[]);
        assert_eq!(table.len(), 2);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics.entries()[0].message.contains("before any newmtl"));
    }

    #[test]
    fn test_unknown_keyword_is_reported() {
        let (_, diagnostics) = parse("newmtl M\nsharpness 60\n", &[]);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics.entries()[0].message.contains("sharpness"));
    }

    #[test]
    fn test_malformed_value_skips_statement_only() {
        let (table, diagnostics) = parse("newmtl M\nKd red green blue\nNs 12.0\n", &[]);
        let (_, mat) = table.get("M").unwrap();

        // The bad Kd keeps its default; the following Ns still applies.
        assert_eq!(mat.diffuse, Vec3::new(0.8, 0.8, 0.8));
        assert_eq!(mat.shininess, 12.0);
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_redeclared_material_replaces_in_place() {
        let mtl_content = r#"
newmtl paint
Kd 1.0 0.0 0.0
newmtl other
newmtl paint
Kd 0.0 0.0 1.0
"#;
        let (table, diagnostics) = parse(mtl_content, &[]);

        assert_eq!(table.len(), 3);
        assert_eq!(table.index_of("paint"), Some(1));
        assert_eq!(table.by_index(1).unwrap().diffuse, Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics.entries()[0].message.contains("re-declared"));
    }
}
