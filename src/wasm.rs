use crate::kdtree::KdTree;
use crate::query::Nearest;
use glam::DVec3;
use js_sys::{Float64Array, Object, Reflect};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(typescript_custom_section)]
const TS_NEAREST: &'static str = r#"
export interface Nearest {
    index: number;
    distance: number;
    point: Float64Array;
}
"#;

/// WASM wrapper for a 3D k-d tree.
#[wasm_bindgen]
pub struct KdTree3D {
    inner: KdTree,
}

#[wasm_bindgen]
impl KdTree3D {
    #[wasm_bindgen(constructor)]
    pub fn new(max_leaf_size: usize, max_depth: usize) -> KdTree3D {
        KdTree3D {
            inner: KdTree::with_limits(max_leaf_size, max_depth),
        }
    }

    #[wasm_bindgen(js_name = addPoint)]
    pub fn add_point(&mut self, x: f64, y: f64, z: f64) {
        self.inner.add_xyz(x, y, z);
    }

    /// Appends points from a flat `[x, y, z, ...]` array.
    #[wasm_bindgen(js_name = addPoints)]
    pub fn add_points(&mut self, coords: &[f64]) -> Result<usize, JsValue> {
        self.inner.add_flat(coords).map_err(to_js_error)
    }

    pub fn build(&mut self) -> Result<(), JsValue> {
        self.inner.build().map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = findClosestPoint)]
    pub fn find_closest_point(&self, x: f64, y: f64, z: f64, distance: f64) -> Result<JsValue, JsValue> {
        let nearest = self.inner.find_closest_point(DVec3::new(x, y, z), distance).map_err(to_js_error)?;
        nearest_to_js(nearest)
    }

    #[wasm_bindgen(js_name = findClosestPointInSphere)]
    pub fn find_closest_point_in_sphere(&self, x: f64, y: f64, z: f64, radius: f64) -> Result<JsValue, JsValue> {
        let nearest = self
            .inner
            .find_closest_point_in_sphere(DVec3::new(x, y, z), radius)
            .map_err(to_js_error)?;
        nearest_to_js(nearest)
    }

    #[wasm_bindgen(js_name = findClosestPointBrute)]
    pub fn find_closest_point_brute(&self, x: f64, y: f64, z: f64) -> Result<JsValue, JsValue> {
        nearest_to_js(self.inner.find_closest_point_brute(DVec3::new(x, y, z)))
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    #[wasm_bindgen(getter)]
    pub fn count(&self) -> usize {
        self.inner.len()
    }

    #[wasm_bindgen(getter, js_name = isBuilt)]
    pub fn is_built(&self) -> bool {
        self.inner.is_built()
    }

    /// Stored points as a flat `[x, y, z, ...]` array.
    #[wasm_bindgen(getter)]
    pub fn points(&self) -> Float64Array {
        let flat: Vec<f64> = self.inner.points().iter().flat_map(|p| p.to_array()).collect();
        Float64Array::from(&flat[..])
    }
}

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn nearest_to_js(nearest: Option<Nearest>) -> Result<JsValue, JsValue> {
    let Some(nearest) = nearest else {
        return Ok(JsValue::UNDEFINED);
    };
    let obj = Object::new();
    Reflect::set(&obj, &"index".into(), &JsValue::from(nearest.index as u32))?;
    Reflect::set(&obj, &"distance".into(), &JsValue::from(nearest.distance))?;
    Reflect::set(&obj, &"point".into(), &Float64Array::from(&nearest.point.to_array()[..]))?;
    Ok(obj.into())
}
