//! Drives the Issy environment over an in-memory network with a policy that
//! switches every light on a fixed cycle.

use issy::rollout::collect_shard;
use issy::{EnvParams, IssyEnv, MemoryKernel};
use serde_json::json;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let mut kernel = MemoryKernel::new()
        .with_traffic_light("center", "GGrrGGrr")
        .with_traffic_light("north", "GrGr")
        .with_traffic_light("south", "rGrG");
    for i in 0..30 {
        kernel = kernel.with_vehicle(format!("veh{i}"), i as f64 * 7.5, 8.0 + (i % 5) as f64);
    }

    let params = EnvParams::default()
        .with_horizon(20)
        .with_additional_param("beta", json!(20))
        .with_additional_param("switch_penalty", json!(0.25));
    let mut env = IssyEnv::new(kernel, params)?;
    println!("action space: {:?}", env.action_space()?);
    println!("observation space: {:?}", env.observation_space());

    let mut tick = 0u32;
    let shard = collect_shard(
        &mut env,
        |_obs| {
            tick += 1;
            let switch = if tick % 5 == 0 { 1.0 } else { 0.0 };
            vec![switch; 3]
        },
        0,
    )?;

    println!(
        "shard {}: {} steps, return {:.2}",
        shard.id,
        shard.len(),
        shard.total_reward()
    );
    println!("{}", serde_json::to_string_pretty(&shard.steps.last())?);
    Ok(())
}
