// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The hero mesh rendered with `three.js`.
//!
//! The page loads `three.js` as a classic script, which exposes the global
//! `THREE` namespace. The bindings below cover only what [`ThreeScene`]
//! needs: a scene, a perspective camera, a torus-knot mesh with a standard
//! material, one point light and a WebGL renderer on an existing canvas.

use kurbo::Size;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use strata_core::mesh::{MeshConfig, Rgb, Rotation, SceneBackend};

#[wasm_bindgen(js_namespace = THREE)]
extern "C" {
    type Object3D;

    #[wasm_bindgen(method, getter)]
    fn position(this: &Object3D) -> Vector3;

    #[wasm_bindgen(method, getter)]
    fn rotation(this: &Object3D) -> Euler;

    type Vector3;

    #[wasm_bindgen(method)]
    fn set(this: &Vector3, x: f64, y: f64, z: f64);

    type Euler;

    #[wasm_bindgen(method, setter = x)]
    fn set_x(this: &Euler, value: f64);

    #[wasm_bindgen(method, setter = y)]
    fn set_y(this: &Euler, value: f64);

    type Color;

    #[wasm_bindgen(method, js_name = setHex)]
    fn set_hex(this: &Color, hex: u32);

    #[wasm_bindgen(extends = Object3D)]
    type Scene;

    #[wasm_bindgen(constructor)]
    fn new() -> Scene;

    #[wasm_bindgen(method)]
    fn add(this: &Scene, object: &Object3D);

    #[wasm_bindgen(extends = Object3D)]
    type PerspectiveCamera;

    #[wasm_bindgen(constructor)]
    fn new(fov: f64, aspect: f64, near: f64, far: f64) -> PerspectiveCamera;

    #[wasm_bindgen(method, setter)]
    fn set_aspect(this: &PerspectiveCamera, aspect: f64);

    #[wasm_bindgen(method, js_name = updateProjectionMatrix)]
    fn update_projection_matrix(this: &PerspectiveCamera);

    type TorusKnotGeometry;

    #[wasm_bindgen(constructor)]
    fn new(
        radius: f64,
        tube: f64,
        tubular_segments: u32,
        radial_segments: u32,
    ) -> TorusKnotGeometry;

    type MeshStandardMaterial;

    #[wasm_bindgen(constructor)]
    fn new(parameters: &js_sys::Object) -> MeshStandardMaterial;

    #[wasm_bindgen(method, getter)]
    fn color(this: &MeshStandardMaterial) -> Color;

    #[wasm_bindgen(extends = Object3D)]
    type Mesh;

    #[wasm_bindgen(constructor)]
    fn new(geometry: &TorusKnotGeometry, material: &MeshStandardMaterial) -> Mesh;

    #[wasm_bindgen(extends = Object3D)]
    type PointLight;

    #[wasm_bindgen(constructor)]
    fn new(color: u32, intensity: f64) -> PointLight;

    type WebGLRenderer;

    #[wasm_bindgen(constructor, catch)]
    fn new(parameters: &js_sys::Object) -> Result<WebGLRenderer, JsValue>;

    #[wasm_bindgen(method, js_name = setSize)]
    fn set_size(this: &WebGLRenderer, width: f64, height: f64, update_style: bool);

    #[wasm_bindgen(method, js_name = setPixelRatio)]
    fn set_pixel_ratio(this: &WebGLRenderer, ratio: f64);

    #[wasm_bindgen(method)]
    fn render(this: &WebGLRenderer, scene: &Scene, camera: &PerspectiveCamera);
}

/// Returns `true` if the global `THREE` namespace is loaded.
#[must_use]
pub fn three_available() -> bool {
    js_sys::Reflect::has(&js_sys::global(), &JsValue::from_str("THREE")).unwrap_or(false)
}

fn options(entries: &[(&str, JsValue)]) -> Result<js_sys::Object, JsValue> {
    let object = js_sys::Object::new();
    for (key, value) in entries {
        js_sys::Reflect::set(&object, &JsValue::from_str(key), value)?;
    }
    Ok(object)
}

/// A `three.js` scene holding the hero mesh.
pub struct ThreeScene {
    renderer: WebGLRenderer,
    scene: Scene,
    camera: PerspectiveCamera,
    mesh: Mesh,
    material: MeshStandardMaterial,
}

impl core::fmt::Debug for ThreeScene {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ThreeScene").finish_non_exhaustive()
    }
}

impl ThreeScene {
    /// Builds the scene on `canvas`, sized to the canvas's client box.
    pub fn new(canvas: &HtmlCanvasElement, config: &MeshConfig) -> Result<Self, JsValue> {
        let size = Size::new(
            f64::from(canvas.client_width()),
            f64::from(canvas.client_height()),
        );

        let renderer = WebGLRenderer::new(&options(&[
            ("canvas", JsValue::from(canvas.clone())),
            ("alpha", JsValue::TRUE),
            ("antialias", JsValue::TRUE),
        ])?)?;
        if let Some(window) = web_sys::window() {
            renderer.set_pixel_ratio(window.device_pixel_ratio());
        }
        renderer.set_size(size.width, size.height, false);

        let scene = Scene::new();
        let cam = config.camera;
        let camera = PerspectiveCamera::new(cam.fov_degrees, aspect(size), cam.near, cam.far);
        camera.position().set(0.0, 0.0, cam.distance);

        let g = config.geometry;
        let geometry =
            TorusKnotGeometry::new(g.radius, g.tube, g.tubular_segments, g.radial_segments);
        let material = MeshStandardMaterial::new(&options(&[
            ("color", JsValue::from(config.color.to_u32())),
            ("metalness", JsValue::from_f64(config.metalness)),
            ("roughness", JsValue::from_f64(config.roughness)),
        ])?);
        let mesh = Mesh::new(&geometry, &material);
        scene.add(&mesh);

        let light = PointLight::new(config.light.color.to_u32(), config.light.intensity);
        let [x, y, z] = config.light.position;
        light.position().set(x, y, z);
        scene.add(&light);

        Ok(Self {
            renderer,
            scene,
            camera,
            mesh,
            material,
        })
    }
}

fn aspect(size: Size) -> f64 {
    if size.height > 0.0 {
        size.width / size.height
    } else {
        1.0
    }
}

impl SceneBackend for ThreeScene {
    fn set_rotation(&mut self, rotation: Rotation) {
        let euler = self.mesh.rotation();
        euler.set_x(rotation.x);
        euler.set_y(rotation.y);
    }

    fn set_color(&mut self, color: Rgb) {
        self.material.color().set_hex(color.to_u32());
    }

    fn resize(&mut self, size: Size) {
        self.renderer.set_size(size.width, size.height, false);
        self.camera.set_aspect(aspect(size));
        self.camera.update_projection_matrix();
    }

    fn render(&mut self) {
        self.renderer.render(&self.scene, &self.camera);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_guards_zero_height() {
        assert_eq!(aspect(Size::new(800.0, 400.0)), 2.0);
        assert_eq!(aspect(Size::new(800.0, 0.0)), 1.0);
    }
}
