//! Highlight annotation objects
//!
//! Writes `/Subtype /Highlight` dictionaries on the PDF object graph and
//! links them into the page's `/Annots` array. Appearance streams are
//! generated by MuPDF when the document is saved.

use mupdf::pdf::{PdfDocument, PdfObject};

use super::geometry::UserQuad;
use crate::document::{AccessResult, ColorTag};

/// Annotation print flag (PDF 32000-1, 12.5.3)
const FLAG_PRINT: i32 = 4;

/// Append a highlight over `quad` to the page object `page_obj`
pub fn append_highlight(
    doc: &mut PdfDocument,
    page_obj: &mut PdfObject,
    quad: &UserQuad,
    color: ColorTag,
) -> AccessResult<()> {
    let mut annot = doc.new_dict()?;
    annot.dict_put("Type", doc.new_name("Annot")?)?;
    annot.dict_put("Subtype", doc.new_name("Highlight")?)?;
    annot.dict_put("F", doc.new_int(FLAG_PRINT)?)?;
    annot.dict_put("Rect", number_array(doc, &quad.bounds())?)?;
    annot.dict_put("QuadPoints", number_array(doc, &quad.quad_points())?)?;
    annot.dict_put("C", number_array(doc, &color.channels())?)?;
    let annot = doc.add_object(&annot)?;

    match page_obj.get_dict("Annots")? {
        Some(mut annots) => annots.array_push(annot)?,
        None => {
            let mut annots = doc.new_array()?;
            annots.array_push(annot)?;
            page_obj.dict_put("Annots", annots)?;
        }
    }
    Ok(())
}

fn number_array(doc: &mut PdfDocument, values: &[f32]) -> AccessResult<PdfObject> {
    let mut array = doc.new_array()?;
    for &value in values {
        array.array_push(doc.new_real(value)?)?;
    }
    Ok(array)
}
