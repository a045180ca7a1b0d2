//! Puts result fragments into the page and wires up the widgets they contain.

use common::search_dispatcher::ResultRenderer;
use common::search_error::RenderError;
use common::tag_cloud::{tag_cloud_opacities, tag_title};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

/// Marks tooltip anchors already given a `title`.
const TOOLTIP_READY_ATTRIBUTE: &str = "data-tooltip-ready";

pub struct DomResultRenderer {
    container_id: String,
}

impl DomResultRenderer {
    pub fn new(container_id: impl Into<String>) -> Self {
        Self { container_id: container_id.into() }
    }
}

impl ResultRenderer for DomResultRenderer {
    fn render(&mut self, fragment: &str) -> Result<(), RenderError> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| RenderError::new("no document"))?;
        let container = document
            .get_element_by_id(&self.container_id)
            .ok_or_else(|| RenderError::new(format!("missing container #{}", self.container_id)))?;
        container.set_inner_html(fragment);
        init_tag_clouds(&container)?;
        init_tooltips(&container)?;
        Ok(())
    }
}

fn query_all(root: &Element, selector: &str) -> Result<Vec<Element>, RenderError> {
    let nodes = root
        .query_selector_all(selector)
        .map_err(|e| RenderError::new(format!("bad selector {}: {:?}", selector, e)))?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// Fades `.tagcloud a[data-size]` entries by relative weight.
fn init_tag_clouds(container: &Element) -> Result<(), RenderError> {
    for cloud in query_all(container, ".tagcloud")? {
        let prefix = cloud.get_attribute("data-valprefix");
        let anchors = query_all(&cloud, "a")?;
        let sizes: Vec<String> = anchors.iter().map(|a| a.get_attribute("data-size").unwrap_or_default()).collect();
        let weights: Vec<f64> = sizes.iter().map(|size| size.parse::<f64>().unwrap_or(0.0)).collect();
        let opacities = tag_cloud_opacities(&weights);

        for ((anchor, size), opacity) in anchors.iter().zip(&sizes).zip(opacities) {
            if let Some(element) = anchor.dyn_ref::<HtmlElement>() {
                element
                    .style()
                    .set_property("opacity", &format!("{:.3}", opacity))
                    .map_err(|e| RenderError::new(format!("tag cloud style: {:?}", e)))?;
            }
            if let Some(title) = tag_title(prefix.as_deref(), size) {
                anchor
                    .set_attribute("title", &title)
                    .map_err(|e| RenderError::new(format!("tag cloud title: {:?}", e)))?;
            }
        }
    }
    Ok(())
}

/// Gives `[data-toggle=tooltip]` elements a native tooltip from `data-title`.
fn init_tooltips(container: &Element) -> Result<(), RenderError> {
    for element in query_all(container, "[data-toggle=tooltip]")? {
        if element.has_attribute(TOOLTIP_READY_ATTRIBUTE) {
            continue;
        }
        if let Some(title) = element.get_attribute("data-title").filter(|title| !title.is_empty()) {
            element
                .set_attribute("title", &title)
                .map_err(|e| RenderError::new(format!("tooltip: {:?}", e)))?;
        }
        element
            .set_attribute(TOOLTIP_READY_ATTRIBUTE, "")
            .map_err(|e| RenderError::new(format!("tooltip: {:?}", e)))?;
    }
    Ok(())
}
