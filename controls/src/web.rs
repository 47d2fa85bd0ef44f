//! `wasm-bindgen` entry points for page scripts.
//!
//! Pages call [`build_panel`], then construct a [`ScaleTableHandle`], then
//! [`bind`] the two with a calculation function. Everything runs inside the
//! browser's event handlers; failures are logged to the console and leave
//! the page usable.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Array, Function, Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::Element;

use crate::binder::{Binding, CalcFn, InferFn};
use crate::descriptor::{ControlDescriptor, Overrides};
use crate::dom::DomTree;
use crate::error::Error;
use crate::factory::Rendered;
use crate::panel::{CoordinateMode, Panel, PanelBuilder};
use crate::table::{ScaleTable, TableSpec, ValueGrid};
use crate::tree::UiTree;
use crate::typeset::Typesetter;

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Install the panic hook and the console logger.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        log::debug!("console logger already installed: {err}");
    }
}

/// Typesets through `window.MathJax.typesetPromise` when the page loads MathJax.
#[derive(Debug, Default, Clone, Copy)]
pub struct MathJax;

impl Typesetter<Element> for MathJax {
    fn typeset(&self, root: &Element) -> bool {
        let Some(window) = web_sys::window() else {
            return false;
        };
        let Ok(mathjax) = Reflect::get(&window, &JsValue::from_str("MathJax")) else {
            return false;
        };
        if mathjax.is_undefined() || mathjax.is_null() {
            return false;
        }
        let Ok(typeset) = Reflect::get(&mathjax, &JsValue::from_str("typesetPromise")) else {
            return false;
        };
        let Some(typeset) = typeset.dyn_ref::<Function>() else {
            return false;
        };
        match typeset.call1(&mathjax, &Array::of1(root)) {
            Ok(result) => {
                if let Some(promise) = result.dyn_ref::<Promise>() {
                    let on_error = Closure::wrap(Box::new(|err: JsValue| {
                        log::warn!("MathJax typesetting failed: {err:?}");
                    }) as Box<dyn FnMut(JsValue)>);
                    let _pending = promise.catch(&on_error);
                    on_error.forget();
                }
            }
            Err(err) => log::warn!("MathJax typesetting failed: {err:?}"),
        }
        true
    }
}

fn listen(node: &Element, event: &str, mut handler: impl FnMut() + 'static) {
    let cb = Closure::wrap(Box::new(move |_event: web_sys::Event| handler()) as Box<dyn FnMut(web_sys::Event)>);
    if let Err(err) = node.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref()) {
        log::error!("cannot listen for `{event}`: {err:?}");
    }
    cb.forget();
}

/// A built panel with its event listeners attached.
#[wasm_bindgen]
pub struct PanelHandle {
    panel: Rc<RefCell<Panel<Element>>>,
}

#[wasm_bindgen]
impl PanelHandle {
    /// Current coordinate mode: `dimensional` or `non-dimensional`.
    #[wasm_bindgen(getter)]
    #[must_use]
    pub fn mode(&self) -> String {
        self.panel.borrow().mode().as_str().to_owned()
    }

    /// Ids of the panel's sliders in display order.
    #[wasm_bindgen(js_name = sliderIds)]
    #[must_use]
    pub fn slider_ids(&self) -> Vec<String> {
        self.panel.borrow().slider_ids().into_iter().map(str::to_owned).collect()
    }
}

/// Populate `container_id` from a JSON descriptor array.
///
/// # Errors
///
/// Rejects unparsable JSON, a missing container and duplicate ids.
#[wasm_bindgen(js_name = buildPanel)]
pub fn build_panel(
    container_id: &str,
    descriptors_json: &str,
    overrides_json: Option<String>,
    starting_coordinates: Option<String>,
) -> Result<PanelHandle, JsValue> {
    let descriptors: Vec<ControlDescriptor> = serde_json::from_str(descriptors_json).map_err(to_js)?;
    let overrides: Overrides = match overrides_json.as_deref() {
        Some(json) if !json.trim().is_empty() => serde_json::from_str(json).map_err(to_js)?,
        _ => Overrides::new(),
    };
    let starting = match starting_coordinates.as_deref() {
        Some(mode) => mode.parse::<CoordinateMode>().map_err(to_js)?,
        None => CoordinateMode::default(),
    };

    let mut tree = DomTree::from_window().map_err(to_js)?;
    let mathjax = MathJax;
    let panel = PanelBuilder::new(container_id)
        .controls(descriptors)
        .overrides(overrides)
        .starting_coordinates(starting)
        .typesetter(&mathjax)
        .build(&mut tree)
        .map_err(|err| {
            log::error!("panel `{container_id}` not built: {err}");
            to_js(err)
        })?;

    let panel = Rc::new(RefCell::new(panel));
    attach_panel_listeners(&panel, &tree);
    Ok(PanelHandle { panel })
}

fn attach_panel_listeners(panel: &Rc<RefCell<Panel<Element>>>, tree: &DomTree) {
    let borrowed = panel.borrow();
    if let Rendered::Toggles { inputs } = &borrowed.toggle().rendered {
        for (option_id, node) in inputs {
            let panel = Rc::clone(panel);
            let mut tree = tree.clone();
            let option_id = option_id.clone();
            listen(node, "change", move || {
                if let Err(err) = panel.borrow_mut().on_toggle_change(&mut tree, &option_id) {
                    log::error!("coordinate toggle failed: {err}");
                }
            });
        }
    }
    for control in borrowed.controls() {
        if let Rendered::Slider { input, .. } = &control.rendered {
            let panel = Rc::clone(panel);
            let mut tree = tree.clone();
            let id = control.id.clone();
            listen(input, "input", move || {
                if let Err(err) = panel.borrow().on_input(&mut tree, &id) {
                    log::error!("slider `{id}` output not refreshed: {err}");
                }
            });
        }
    }
}

/// A rendered scale table waiting to be bound.
#[wasm_bindgen]
pub struct ScaleTableHandle {
    table: Option<ScaleTable<Element>>,
}

#[wasm_bindgen]
impl ScaleTableHandle {
    /// Render a table into `container_id`.
    ///
    /// `labels_json` is a ragged string grid, `values_json` a matching grid
    /// of numbers or `null`, `units_json` an optional unit grid.
    ///
    /// # Errors
    ///
    /// Rejects unparsable JSON, a missing container and mis-shaped grids.
    #[wasm_bindgen(constructor)]
    pub fn new(
        table_id: &str,
        container_id: &str,
        labels_json: &str,
        values_json: &str,
        units_json: Option<String>,
    ) -> Result<ScaleTableHandle, JsValue> {
        let spec = TableSpec {
            table_id: table_id.to_owned(),
            labels: serde_json::from_str(labels_json).map_err(to_js)?,
            values: serde_json::from_str(values_json).map_err(to_js)?,
            units: match units_json.as_deref() {
                Some(json) => serde_json::from_str(json).map_err(to_js)?,
                None => Vec::new(),
            },
            ..TableSpec::default()
        };
        render_table(container_id, spec)
    }

    /// Render a table described by a full JSON [`TableSpec`], inferred strip included.
    ///
    /// # Errors
    ///
    /// Same as the constructor.
    #[wasm_bindgen(js_name = fromSpec)]
    pub fn from_spec(container_id: &str, spec_json: &str) -> Result<ScaleTableHandle, JsValue> {
        let spec: TableSpec = serde_json::from_str(spec_json).map_err(to_js)?;
        render_table(container_id, spec)
    }
}

fn render_table(container_id: &str, spec: TableSpec) -> Result<ScaleTableHandle, JsValue> {
    let mut tree = DomTree::from_window().map_err(to_js)?;
    let root = tree.root();
    let container = tree
        .find_by_id(&root, container_id)
        .ok_or_else(|| to_js(crate::error::ConfigurationError::MissingContainer(container_id.to_owned())))?;
    let table = ScaleTable::build(&mut tree, spec).map_err(to_js)?;
    tree.append_child(&container, table.table()).map_err(to_js)?;
    if table.has_inferred() {
        tree.append_child(&container, table.strip()).map_err(to_js)?;
    }
    if !MathJax.typeset(table.table()) {
        log::debug!("MathJax unavailable; table labels left as markup");
    }
    Ok(ScaleTableHandle { table: Some(table) })
}

/// A live binding; recompute can also be triggered from script.
#[wasm_bindgen]
pub struct BindingHandle {
    binding: Rc<RefCell<Binding<Element>>>,
    tree: DomTree,
}

#[wasm_bindgen]
impl BindingHandle {
    /// Recompute from the current slider values.
    ///
    /// # Errors
    ///
    /// Returns the recompute error; the table keeps its previous render.
    pub fn recompute(&mut self) -> Result<usize, JsValue> {
        self.binding.borrow_mut().recompute(&mut self.tree).map_err(to_js)
    }
}

fn js_calc<T: serde::de::DeserializeOwned + Default>(function: Function) -> impl Fn(&[f64]) -> T {
    move |inputs: &[f64]| {
        let args: Array = inputs.iter().map(|v| JsValue::from_f64(*v)).collect();
        let result = match function.apply(&JsValue::NULL, &args) {
            Ok(result) => result,
            Err(err) => {
                log::error!("calculation threw: {err:?}");
                return T::default();
            }
        };
        let json = match js_sys::JSON::stringify(&result) {
            Ok(json) => String::from(json),
            Err(err) => {
                log::error!("calculation result is not serialisable: {err:?}");
                return T::default();
            }
        };
        serde_json::from_str(&json).unwrap_or_else(|err| {
            log::error!("calculation result has the wrong type: {err}");
            T::default()
        })
    }
}

/// Bind `slider_ids` of `panel` to `calc` and `table`.
///
/// `calc` receives the physical slider values as arguments and returns a
/// grid of numbers or `null`. `infer`, if given, returns the inferred-scale
/// values. The table is taken over by the binding.
///
/// # Errors
///
/// Rejects unknown slider ids and an already-bound table.
#[wasm_bindgen]
pub fn bind(
    panel: &PanelHandle,
    slider_ids: Vec<String>,
    calc: Function,
    table: &mut ScaleTableHandle,
    infer: Option<Function>,
) -> Result<BindingHandle, JsValue> {
    let Some(scale_table) = table.table.take() else {
        return Err(to_js("scale table is already bound"));
    };
    let ids: Vec<&str> = slider_ids.iter().map(String::as_str).collect();
    let calc: CalcFn = Box::new(js_calc::<ValueGrid>(calc));
    let mut binding = crate::binder::bind(&panel.panel.borrow(), &ids, calc, scale_table).map_err(to_js)?;
    if let Some(infer) = infer {
        let infer: InferFn = Box::new(js_calc::<Vec<Option<f64>>>(infer));
        binding = binding.with_inferred(infer);
    }

    let tree = DomTree::from_window().map_err(to_js)?;
    let binding = Rc::new(RefCell::new(binding));
    for id in &slider_ids {
        let Some(input) = tree.find_by_id(&tree.root(), id) else {
            continue;
        };
        let binding = Rc::clone(&binding);
        let mut tree = tree.clone();
        let id = id.clone();
        listen(&input, "input", move || {
            if let Err(err) = binding.borrow_mut().on_input(&mut tree, &id) {
                report(&id, &err);
            }
        });
    }
    Ok(BindingHandle { binding, tree })
}

fn report(id: &str, err: &Error) {
    log::error!("recompute after `{id}` changed failed: {err}");
}
