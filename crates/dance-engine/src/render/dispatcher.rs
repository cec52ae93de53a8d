use crate::camera::Transform;

use super::api::{Attribute, DrawCommands, GraphicsApi};
use super::renderable::{Renderable, Scene};

/// Issues the draw of one renderable under `transform`.
///
/// Binds the program, uploads the transform, binds both attribute streams, draws,
/// and leaves both attribute slots disabled.
pub fn draw<A, C>(cmds: &mut C, renderable: &Renderable<A>, transform: &Transform)
where
    A: GraphicsApi,
    C: DrawCommands<A> + ?Sized,
{
    cmds.use_program(renderable.program());
    cmds.upload_transform(renderable.transform_uniform(), &transform.to_uniform());

    cmds.bind_attribute(Attribute::Position, renderable.positions());
    cmds.bind_attribute(Attribute::Color, renderable.colors());

    cmds.draw_triangles(renderable.vertex_count());

    for attribute in Attribute::ALL {
        cmds.disable_attribute(attribute);
    }
}

/// Draws every renderable of `scene`, in scene order, under one shared transform.
pub fn draw_scene<A, C>(cmds: &mut C, scene: &Scene<A>, transform: &Transform)
where
    A: GraphicsApi,
    C: DrawCommands<A> + ?Sized,
{
    for renderable in scene.iter() {
        draw(cmds, renderable, transform);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::recording::{Command, Recorder, RecordingFactory, test_mesh};

    fn build(vertices: usize) -> Renderable<crate::render::recording::RecordingApi> {
        let mut factory = RecordingFactory::default();
        Renderable::new(&mut factory, &test_mesh("mesh", vertices)).unwrap()
    }

    #[test]
    fn single_triangle_end_to_end() {
        let r = build(3);
        let mut rec = Recorder::default();

        draw(&mut rec, &r, &Transform::IDENTITY);

        assert_eq!(rec.draw_calls(), vec![3]);
        assert!(rec.enabled_slots().is_empty());
    }

    #[test]
    fn command_sequence() {
        let r = build(3);
        let mut rec = Recorder::default();

        draw(&mut rec, &r, &Transform::IDENTITY);

        let program = r.program().0;
        let positions = r.positions().id;
        let colors = r.colors().id;
        assert_eq!(
            rec.commands,
            vec![
                Command::UseProgram(program),
                Command::UploadTransform {
                    program,
                    columns: Transform::IDENTITY.to_uniform().columns,
                },
                Command::BindAttribute { slot: 0, buffer: positions },
                Command::BindAttribute { slot: 1, buffer: colors },
                Command::Draw { vertex_count: 3 },
                Command::DisableAttribute { slot: 0 },
                Command::DisableAttribute { slot: 1 },
            ]
        );
    }

    #[test]
    fn draw_sees_both_attributes_enabled() {
        let r = build(6);
        let mut rec = Recorder::default();
        draw(&mut rec, &r, &Transform::IDENTITY);
        assert_eq!(rec.enabled_at_draw, vec![vec![0, 1]]);
    }

    #[test]
    fn empty_mesh_still_cleans_up() {
        let r = build(0);
        let mut rec = Recorder::default();

        draw(&mut rec, &r, &Transform::IDENTITY);

        assert_eq!(rec.draw_calls(), vec![0]);
        assert!(rec.enabled_slots().is_empty());
    }

    #[test]
    fn scene_draws_in_order_with_shared_transform() {
        let mut factory = RecordingFactory::default();
        let table = [test_mesh("a", 3), test_mesh("b", 3), test_mesh("c", 24)];
        let scene = Scene::from_table(&mut factory, &table).unwrap();
        let transform = Transform(glam::DMat4::from_scale(glam::DVec3::splat(2.0)));
        let mut rec = Recorder::default();

        draw_scene(&mut rec, &scene, &transform);

        assert_eq!(rec.draw_calls(), vec![3, 3, 24]);
        let uploads: Vec<_> = rec
            .commands
            .iter()
            .filter_map(|c| match c {
                Command::UploadTransform { columns, .. } => Some(*columns),
                _ => None,
            })
            .collect();
        assert_eq!(uploads.len(), 3);
        assert!(uploads.iter().all(|c| *c == transform.to_uniform().columns));
        assert!(rec.enabled_slots().is_empty());
    }
}
