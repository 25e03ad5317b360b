//! CSV export of the body list

use std::io::Write;

use anyhow::Result;

use spacetime::body::Body;

pub const CSV_HEADER: [&str; 11] = [
    "ID", "Name", "PosX", "PosY", "PosZ", "VelX", "VelY", "VelZ", "Mass", "Radius", "Color",
];

fn record(body: &Body) -> [String; 11] {
    [
        body.id.0.to_string(),
        body.name.clone(),
        body.position.x.to_string(),
        body.position.y.to_string(),
        body.position.z.to_string(),
        body.velocity.x.to_string(),
        body.velocity.y.to_string(),
        body.velocity.z.to_string(),
        body.mass.to_string(),
        body.radius.to_string(),
        body.color.clone(),
    ]
}

/// Write one header line and one line per body
///
/// The header is written even for an empty list.
pub fn write_csv<W: Write>(bodies: &[Body], writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(CSV_HEADER)?;
    for body in bodies {
        writer.write_record(record(body))?;
    }
    writer.flush()?;
    Ok(())
}
