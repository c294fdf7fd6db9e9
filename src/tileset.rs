//! Tiled tileset (`.tsx`) writer.
//!
//! Ledgers are written as image-collection tilesets: every tile carries its
//! own image, and the tile id is the 1-based ledger position.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::cache::CacheRecord;
use crate::error::{Result, TiledError};

/// Render a ledger as tileset XML.
pub fn to_xml(record: &CacheRecord, name: &str, properties: &[(String, String)]) -> String {
    let (tile_width, tile_height) = record.iter().fold((0, 0), |(w, h), (_, _, image)| {
        (w.max(image.width_px()), h.max(image.height_px()))
    });

    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    // Writing into a String cannot fail.
    let _ = writeln!(
        xml,
        "<tileset name=\"{}\" tilewidth=\"{}\" tileheight=\"{}\" tilecount=\"{}\" columns=\"0\">",
        escape(name),
        tile_width,
        tile_height,
        record.len()
    );

    if !properties.is_empty() {
        xml.push_str("  <properties>\n");
        for (key, value) in properties {
            let _ = writeln!(
                xml,
                "    <property name=\"{}\" value=\"{}\"/>",
                escape(key),
                escape(value)
            );
        }
        xml.push_str("  </properties>\n");
    }

    for (tile_id, _, image) in record.iter() {
        let _ = writeln!(xml, "  <tile id=\"{}\">", tile_id);
        let _ = writeln!(
            xml,
            "    <image source=\"{}\" width=\"{}\" height=\"{}\"/>",
            escape(&image.source),
            escape(&image.width),
            escape(&image.height)
        );
        xml.push_str("  </tile>\n");
    }

    xml.push_str("</tileset>\n");
    xml
}

/// Write a ledger as a `.tsx` file.
pub fn write_tileset(
    path: &Path,
    record: &CacheRecord,
    name: &str,
    properties: &[(String, String)],
) -> Result<()> {
    fs::write(path, to_xml(record, name, properties)).map_err(|e| TiledError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write tileset: {}", e),
    })
}

/// Escape text for use inside a double-quoted XML attribute.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::Image;
    use tempfile::tempdir;

    #[test]
    fn test_tileset_xml() {
        let mut record = CacheRecord::new();
        record.record_if_new("FloorSteel", Image::new("./.images/tiles/FloorSteel.png", 32, 32));
        record.record_if_new("Lattice", Image::new("./.images/tiles/Lattice.png", 32, 32));

        insta::assert_snapshot!(to_xml(&record, "Tiles", &[]), @r###"
        <?xml version="1.0" encoding="UTF-8"?>
        <tileset name="Tiles" tilewidth="32" tileheight="32" tilecount="2" columns="0">
          <tile id="1">
            <image source="./.images/tiles/FloorSteel.png" width="32" height="32"/>
          </tile>
          <tile id="2">
            <image source="./.images/tiles/Lattice.png" width="32" height="32"/>
          </tile>
        </tileset>
        "###);
    }

    #[test]
    fn test_tileset_properties() {
        let mut record = CacheRecord::new();
        record.record_if_new("Arrow", Image::new("./.images/decals_red/Arrow.png", 32, 16));
        let properties = vec![
            ("color_name".to_string(), "paint_red".to_string()),
            ("color_value".to_string(), "#f00".to_string()),
        ];

        insta::assert_snapshot!(to_xml(&record, "Decals - paint_red", &properties), @r###"
        <?xml version="1.0" encoding="UTF-8"?>
        <tileset name="Decals - paint_red" tilewidth="32" tileheight="16" tilecount="1" columns="0">
          <properties>
            <property name="color_name" value="paint_red"/>
            <property name="color_value" value="#f00"/>
          </properties>
          <tile id="1">
            <image source="./.images/decals_red/Arrow.png" width="32" height="16"/>
          </tile>
        </tileset>
        "###);
    }

    #[test]
    fn test_empty_tileset() {
        let xml = to_xml(&CacheRecord::new(), "Tiles", &[]);
        assert!(xml.contains("tilewidth=\"0\" tileheight=\"0\" tilecount=\"0\""));
        assert!(!xml.contains("<tile "));
    }

    #[test]
    fn test_tile_size_is_largest_image() {
        let mut record = CacheRecord::new();
        record.record_if_new("Small", Image::new("s.png", 32, 32));
        record.record_if_new("Tall", Image::new("t.png", 32, 64));
        record.record_if_new("Wide", Image::new("w.png", 96, 32));

        let xml = to_xml(&record, "Entities - All", &[]);
        assert!(xml.contains("tilewidth=\"96\" tileheight=\"64\""));
    }

    #[test]
    fn test_escaping() {
        assert_eq!(escape("a & <b> \"c\" 'd'"), "a &amp; &lt;b&gt; &quot;c&quot; &apos;d&apos;");

        let mut record = CacheRecord::new();
        record.record_if_new("X", Image::new("./.images/x&y.png", 1, 1));
        let xml = to_xml(&record, "R&D", &[]);
        assert!(xml.contains("name=\"R&amp;D\""));
        assert!(xml.contains("source=\"./.images/x&amp;y.png\""));
    }

    #[test]
    fn test_write_tileset() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tiles.tsx");

        write_tileset(&path, &CacheRecord::new(), "Tiles", &[]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("<?xml"));
    }
}
