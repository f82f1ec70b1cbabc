use blob_core::constants::{BLOB_COLORS, BLOB_COUNT, BLOB_TRANSITION};
use blob_core::{BlobTransform, ShapeParams, VisualParams};
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

fn create_div(document: &web::Document) -> anyhow::Result<web::HtmlElement> {
    document
        .create_element("div")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into::<web::HtmlElement>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))
}

#[inline]
fn set_style(el: &web::HtmlElement, name: &str, value: &str) {
    _ = el.style().set_property(name, value);
}

/// The padded stage inside the container plus one div per blob.
pub struct BlobStage {
    pub stage: web::HtmlElement,
    pub blobs: [web::HtmlElement; BLOB_COUNT],
}

impl BlobStage {
    pub fn build(document: &web::Document, container: &web::HtmlElement) -> anyhow::Result<Self> {
        set_style(container, "position", "fixed");
        set_style(container, "inset", "0");
        set_style(container, "overflow", "hidden");
        set_style(container, "display", "flex");
        set_style(container, "align-items", "center");
        set_style(container, "justify-content", "center");
        set_style(container, "transition", "background-color 500ms");

        let stage = create_div(document)?;
        set_style(&stage, "position", "relative");
        container
            .append_child(&stage)
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;

        let blobs = [
            create_div(document)?,
            create_div(document)?,
            create_div(document)?,
        ];
        for (i, blob) in blobs.iter().enumerate() {
            set_style(blob, "position", "absolute");
            set_style(blob, "top", "50%");
            set_style(blob, "left", "50%");
            set_style(blob, "transition", BLOB_TRANSITION);
            set_style(
                blob,
                "border-radius",
                &ShapeParams::for_blob(i).css_border_radius(),
            );
            stage
                .append_child(blob)
                .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        }
        Ok(Self { stage, blobs })
    }

    pub fn apply_visuals(&self, container: &web::HtmlElement, visual: &VisualParams) {
        set_style(container, "background-color", &visual.background);
        let inset = format!("calc(100% - {}px)", visual.padding * 2.0);
        set_style(&self.stage, "width", &inset);
        set_style(&self.stage, "height", &inset);

        let size = format!("{}px", visual.size);
        let blur = format!("blur({}px)", visual.blur);
        for (blob, rgb) in self.blobs.iter().zip(BLOB_COLORS) {
            set_style(blob, "width", &size);
            set_style(blob, "height", &size);
            set_style(blob, "filter", &blur);
            set_style(blob, "background", &visual.radial_gradient(rgb));
            set_style(blob, "mix-blend-mode", &visual.blend_mode);
        }
    }

    pub fn apply_transforms(&self, transforms: &[BlobTransform; BLOB_COUNT]) {
        for (blob, t) in self.blobs.iter().zip(transforms) {
            set_style(blob, "transform", &t.css_transform());
        }
    }

    pub fn remove(&self) {
        self.stage.remove();
    }
}
