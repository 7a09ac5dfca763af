use issy::kernel::{Kernel, TrafficLightKernel};
use issy::{EnvError, EnvParams, IssyEnv, KernelError, MemoryKernel, SignalError};
use serde_json::json;

fn three_light_network() -> MemoryKernel {
    MemoryKernel::new()
        .with_traffic_light("tl0", "GrG")
        .with_traffic_light("tl1", "gyr")
        .with_traffic_light("tl2", "rrGG")
        .with_vehicle("veh0", 10.0, 0.0)
        .with_vehicle("veh1", 20.0, 10.0)
        .with_vehicle("veh2", 30.0, 20.0)
}

fn env_with(kernel: MemoryKernel) -> IssyEnv<MemoryKernel> {
    IssyEnv::new(kernel, EnvParams::default()).unwrap()
}

#[test]
fn spaces_follow_network_size() {
    let env = env_with(three_light_network());
    let action_space = env.action_space().unwrap();
    assert_eq!(action_space.shape, vec![3]);
    assert_eq!((action_space.low, action_space.high), (0.0, 1.0));

    let obs_space = env.observation_space();
    assert_eq!(obs_space.shape, vec![6]);
    assert_eq!(obs_space.high, f32::INFINITY);
}

#[test]
fn observation_is_positions_then_speeds() {
    let env = env_with(three_light_network());
    let obs = env.get_state().unwrap();
    assert_eq!(obs, vec![10.0, 20.0, 30.0, 0.0, 10.0, 20.0]);
    assert!(env.observation_space().contains(&obs));
}

#[test]
fn observation_is_capped_by_beta() {
    let mut kernel = MemoryKernel::new();
    for i in 0..25 {
        kernel = kernel.with_vehicle(format!("veh{i}"), i as f64, 1.0);
    }
    let env = IssyEnv::new(kernel, EnvParams::default()).unwrap();
    assert_eq!(env.slots(), 20);

    let obs = env.get_state().unwrap();
    assert_eq!(obs.len(), 40);
    assert_eq!(obs[19], 19.0);
    assert!(obs[20..].iter().all(|v| *v == 1.0));
}

#[test]
fn observation_is_zero_padded_when_vehicles_leave() {
    let mut env = env_with(three_light_network());
    env.kernel_mut().remove_vehicle("veh0").unwrap();

    let obs = env.get_state().unwrap();
    assert_eq!(obs, vec![20.0, 30.0, 0.0, 10.0, 20.0, 0.0]);
}

#[test]
fn beta_comes_from_additional_params() {
    let params = EnvParams::default().with_additional_param("beta", json!(2));
    let env = IssyEnv::new(three_light_network(), params).unwrap();
    assert_eq!(env.slots(), 2);
    assert_eq!(env.get_state().unwrap(), vec![10.0, 20.0, 0.0, 10.0]);
}

#[test]
fn all_zero_actions_leave_lights_alone() {
    let mut env = env_with(three_light_network());
    let switched = env.apply_rl_actions(&[0.0, 0.2, 0.49]).unwrap();
    assert_eq!(switched, 0);
    assert!(env.kernel().traffic_light().set_state_log().is_empty());
}

#[test]
fn all_one_actions_invert_every_light() {
    let mut env = env_with(three_light_network());
    let switched = env.apply_rl_actions(&[1.0, 0.9, 0.51]).unwrap();
    assert_eq!(switched, 3);

    let lights = env.kernel().traffic_light();
    assert_eq!(lights.get_state("tl0").unwrap(), "rGr");
    assert_eq!(lights.get_state("tl1").unwrap(), "rGG");
    assert_eq!(lights.get_state("tl2").unwrap(), "GGrr");
    assert_eq!(lights.set_state_log().len(), 3);
}

#[test]
fn only_selected_lights_switch() {
    let mut env = env_with(three_light_network());
    env.apply_rl_actions(&[0.0, 1.0, 0.0]).unwrap();
    assert_eq!(
        env.kernel().traffic_light().set_state_log(),
        &[("tl1".to_string(), "rGG".to_string())]
    );
}

#[test]
fn halves_round_to_even() {
    let mut env = env_with(three_light_network());
    assert_eq!(env.apply_rl_actions(&[0.5, 0.5, 0.5]).unwrap(), 0);

    let params = EnvParams {
        clip_actions: false,
        ..EnvParams::default()
    };
    let mut env = IssyEnv::new(three_light_network(), params).unwrap();
    assert_eq!(env.apply_rl_actions(&[1.5, 2.5, -0.4]).unwrap(), 2);
}

#[test]
fn clipping_bounds_out_of_range_actions() {
    let mut env = env_with(three_light_network());
    assert_eq!(env.apply_rl_actions(&[-3.0, 7.0, 0.0]).unwrap(), 1);
}

#[test]
fn wrong_action_length_is_rejected_before_any_command() {
    let mut env = env_with(three_light_network());
    let err = env.apply_rl_actions(&[1.0, 1.0]).unwrap_err();
    assert!(matches!(err, EnvError::ActionLength { expected: 3, got: 2 }));
    assert!(env.kernel().traffic_light().set_state_log().is_empty());
}

#[test]
fn non_finite_actions_are_rejected() {
    let mut env = env_with(three_light_network());
    let err = env.apply_rl_actions(&[1.0, f32::NAN, 0.0]).unwrap_err();
    assert!(matches!(err, EnvError::InvalidAction { index: 1, .. }));
    assert!(env.kernel().traffic_light().set_state_log().is_empty());
}

#[test]
fn reward_is_mean_speed() {
    let env = env_with(three_light_network());
    assert_eq!(env.compute_reward(&[1.0, 1.0, 1.0]).unwrap(), 10.0);
}

#[test]
fn reward_falls_back_to_zero_without_vehicles() {
    let env = env_with(MemoryKernel::new().with_traffic_light("tl0", "Gr"));
    let reward = env.compute_reward(&[0.0]).unwrap();
    assert_eq!(reward, 0.0);
    assert_eq!(env.get_state().unwrap(), Vec::<f32>::new());
}

#[test]
fn switch_penalty_is_charged_per_switched_light() {
    let params = EnvParams::default().with_additional_param("switch_penalty", json!(1.5));
    let env = IssyEnv::new(three_light_network(), params).unwrap();
    assert_eq!(env.compute_reward(&[0.0, 0.0, 0.0]).unwrap(), 10.0);
    assert_eq!(env.compute_reward(&[1.0, 0.0, 1.0]).unwrap(), 7.0);
}

#[test]
fn invert_tl_state_reads_without_writing() {
    let env = env_with(three_light_network());
    assert_eq!(env.invert_tl_state("tl1").unwrap(), "rGG");
    assert_eq!(env.kernel().traffic_light().get_state("tl1").unwrap(), "gyr");

    let err = env.invert_tl_state("missing").unwrap_err();
    assert!(matches!(
        err,
        EnvError::Kernel(KernelError::UnknownTrafficLight(ref id)) if id == "missing"
    ));
}

#[test]
fn unsupported_encoding_fails_construction() {
    let params = EnvParams::default().with_additional_param("signal_encoding", json!("aimsun"));
    let err = IssyEnv::new(three_light_network(), params)
        .err()
        .expect("construction should fail");
    assert!(matches!(
        err,
        EnvError::Config(issy::ConfigError::Signal(SignalError::UnsupportedEncoding(_)))
    ));
}

#[test]
fn model_spec_is_kept() {
    let params = EnvParams::default().with_additional_param("model_spec", json!("ppo-64x64"));
    let env = IssyEnv::new(three_light_network(), params).unwrap();
    assert_eq!(env.model_spec(), Some(&json!("ppo-64x64")));
    assert_eq!(env.kernel().scenario().num_vehicles, 3);
}
