use serde::Serialize;
use tracing::info;

use crate::env::{Env, EnvError, Step, TrajectoryShard};

// The basic RL loop
pub fn run_episode<E, P>(env: &mut E, mut policy: P) -> Result<f32, EnvError>
where
    E: Env,
    P: FnMut(&E::Obs) -> E::Act,
{
    let mut total_reward = 0.0;
    let mut obs = env.reset()?;

    loop {
        let action = policy(&obs);
        let (next_obs, reward, done, _info) = env.step(action)?;
        total_reward += reward;

        if done {
            break;
        }
        obs = next_obs;
    }

    Ok(total_reward)
}

/// Runs one episode and records every step, tagged with the policy version
/// that produced the actions.
///
/// `obs` in each recorded step is the observation the action was chosen
/// from.
pub fn collect_shard<E, P>(
    env: &mut E,
    mut policy: P,
    version: u64,
) -> Result<TrajectoryShard<E::Obs, E::Act>, EnvError>
where
    E: Env,
    E::Info: Serialize,
    P: FnMut(&E::Obs) -> E::Act,
{
    let mut shard = TrajectoryShard::new(version);
    let mut obs = env.reset()?;

    loop {
        let act = policy(&obs);
        let (next_obs, rew, done, info) = env.step(act.clone())?;
        shard.steps.push(Step {
            obs,
            act,
            rew,
            done,
            info: serde_json::to_value(&info)?,
        });

        if done {
            break;
        }
        obs = next_obs;
    }

    info!(
        shard_id = %shard.id,
        version,
        steps = shard.len(),
        total_reward = shard.total_reward(),
        "collected trajectory shard"
    );
    Ok(shard)
}
