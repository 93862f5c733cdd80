use interior_ngin::{
    builders::lit_graph,
    config::LightConfig,
    data_structures::model::Material,
    pipelines::light::LightUniform,
    render::MaterialUniform,
};

use crate::common::test_utils::assert_close;

mod common;

#[test]
fn should_collect_scene_lights() {
    let uniform = LightUniform::from_scene(&lit_graph(&LightConfig::default()));

    for channel in uniform.ambient() {
        assert_close(channel, 0.6, "ambient");
    }
    let [x, y, z] = uniform.direction();
    assert_close(x, 2.0 / 3.0, "sun x");
    assert_close(y, 2.0 / 3.0, "sun y");
    assert_close(z, 1.0 / 3.0, "sun z");
}

#[test]
fn should_pack_material_opacity() {
    let material = Material::lambert("glass", 0xffffff).with_opacity(0.5);
    let raw: [f32; 8] = bytemuck::cast(MaterialUniform::from(&material));

    assert_eq!(&raw[..4], &[1.0, 1.0, 1.0, 0.5]);
    assert_eq!(raw[4], 0.0, "lambert has no specular term");
}

#[test]
#[cfg(feature = "integration-tests")]
fn should_build_scene_pipelines() {
    use interior_ngin::{
        data_structures::texture,
        pipelines::{
            basic::mk_basic_pipeline, transparent::mk_transparent_pipeline, uniform_layout,
        },
    };

    common::test_utils::init_logger();
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
    let adapter = futures::executor::block_on(instance.request_adapter(
        &wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: None,
            force_fallback_adapter: false,
        },
    ))
    .expect("a graphics adapter");
    let (device, _queue) = futures::executor::block_on(
        adapter.request_device(&wgpu::DeviceDescriptor::default()),
    )
    .expect("a device");

    let material_layout = texture::material_layout(&device);
    let camera_layout = uniform_layout(&device, "camera_bind_group_layout");
    let light_layout = uniform_layout(&device, "light_bind_group_layout");
    let format = wgpu::TextureFormat::Rgba8UnormSrgb;

    let _opaque = mk_basic_pipeline(
        &device,
        format,
        &material_layout,
        &camera_layout,
        &light_layout,
    );
    let _transparent = mk_transparent_pipeline(
        &device,
        format,
        &material_layout,
        &camera_layout,
        &light_layout,
    );
}
