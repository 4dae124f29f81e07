use crate::error::Result;
use crate::model::Entity;
use std::io::Write;

pub const DEFAULT_EXPORT_FILENAME: &str = "organizations.txt";

const MISSING: &str = "N/A";

/// Renders the merged result as the plain-text document consumed by the
/// file-export collaborator: one block of `Name:`/`Description:`/
/// `Website:`/`Phone:`/`Email:` lines per entity, blocks separated by a
/// literal `---` line.
pub fn render_document(entities: &[Entity]) -> String {
    entities
        .iter()
        .map(render_block)
        .collect::<Vec<_>>()
        .join("---\n")
}

pub fn write_document<W: Write>(writer: &mut W, entities: &[Entity]) -> Result<()> {
    writer.write_all(render_document(entities).as_bytes())?;
    Ok(())
}

fn render_block(entity: &Entity) -> String {
    format!(
        "Name: {}\nDescription: {}\nWebsite: {}\nPhone: {}\nEmail: {}\n\n",
        entity.name,
        entity.description,
        entity.website.as_deref().unwrap_or(MISSING),
        entity.phone.as_deref().unwrap_or(MISSING),
        entity.email.as_deref().unwrap_or(MISSING),
    )
}
