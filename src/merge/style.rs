use crate::foundation::error::FiguraResult;
use crate::merge::figure::{merge_over, merge_over_opt};
use crate::model::style::{Layer, Style, StyleMergeMask};

/// Compose `over` onto `root` slot by slot.
///
/// A selected layer slot takes the override's layer, merging the two figures
/// when both sides have one; the area selector always comes from the
/// override's layer. Selected slots that are empty in `over` keep the root's
/// value.
#[tracing::instrument(level = "trace", skip_all)]
pub fn style_merge_over(root: &Style, over: &Style, mask: &StyleMergeMask) -> FiguraResult<Style> {
    let content = if mask.content {
        merge_over_opt(root.content.as_ref(), over.content.as_ref())?
    } else {
        root.content.clone()
    };

    let mut out = Style {
        margin: if mask.margin { over.margin } else { root.margin },
        border: if mask.border { over.border } else { root.border },
        padding: if mask.padding {
            over.padding
        } else {
            root.padding
        },
        content,
        ..root.clone()
    };

    merge_layers(&mut out.backgrounds, &over.backgrounds, mask.backgrounds)?;
    merge_layers(&mut out.foregrounds, &over.foregrounds, mask.foregrounds)?;
    take_slots(&mut out.filters, &over.filters, mask.filters);
    take_slots(&mut out.animations, &over.animations, mask.animations);
    Ok(out)
}

fn slot_selected(bits: u8, i: usize) -> bool {
    bits & (1 << i) != 0
}

fn merge_layers(out: &mut [Option<Layer>], over: &[Option<Layer>], bits: u8) -> FiguraResult<()> {
    for (i, (slot, o)) in out.iter_mut().zip(over).enumerate() {
        if !slot_selected(bits, i) {
            continue;
        }
        let Some(o) = o else {
            continue;
        };
        *slot = Some(match slot.take() {
            Some(r) => Layer::new(merge_over(&r.figure, &o.figure)?, o.area),
            None => o.clone(),
        });
    }
    Ok(())
}

fn take_slots<T: Clone>(out: &mut [Option<T>], over: &[Option<T>], bits: u8) {
    for (i, (slot, o)) in out.iter_mut().zip(over).enumerate() {
        if slot_selected(bits, i) && o.is_some() {
            *slot = o.clone();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/merge/style.rs"]
mod tests;
