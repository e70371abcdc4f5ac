use std::sync::Arc;

use anima_core::{Action, AgentId, AttrKey, Task, WorldState, WorldValue};
use anima_goap::{tick_agents, AgentTick, GoapAgent, PlanError, Planner};

#[derive(Default)]
struct TestWorld {
    facts: WorldState,
    log: Vec<&'static str>,
}

/// Writes `value` under `key` both while planning and when executed.
struct Record {
    name: &'static str,
    key: AttrKey,
    value: WorldValue,
}

impl Action<TestWorld> for Record {
    fn apply_effect(&self, state: &mut WorldState) {
        state.set(self.key, self.value.clone());
    }

    fn invoke(&self, world: &mut TestWorld) -> bool {
        world.log.push(self.name);
        world.facts.set(self.key, self.value.clone());
        true
    }
}

struct Fail;

impl Action<TestWorld> for Fail {
    fn invoke(&self, world: &mut TestWorld) -> bool {
        world.log.push("fail");
        false
    }
}

fn record(name: &'static str, key: AttrKey, value: impl Into<WorldValue>) -> Record {
    Record {
        name,
        key,
        value: value.into(),
    }
}

fn library() -> Arc<[Task<TestWorld>]> {
    Arc::from(vec![
        Task::new("t1").with_action(record("t1", 0, false)),
        Task::new("t2").with_action(record("t2", 1, 20)),
        Task::new("t3").with_action(record("t3", 2, "a")),
    ])
}

fn goal() -> WorldState {
    WorldState::new().with(0, false).with(1, 20).with(2, "a")
}

fn start() -> WorldState {
    WorldState::new().with(0, true).with(1, 30).with(2, "b")
}

#[test]
fn agent_plans_then_executes_one_action_per_tick() {
    let mut planner = Planner::default();
    let mut world = TestWorld {
        facts: start(),
        ..Default::default()
    };
    let mut agent = GoapAgent::new(AgentId(1), library(), WorldState::new(), goal());

    let mut ticks = Vec::new();
    for _ in 0..5 {
        let shared = world.facts.clone();
        ticks.push(agent.tick(&mut planner, &shared, &mut world));
    }

    assert_eq!(
        ticks,
        vec![
            AgentTick::Planned {
                steps: 3,
                depth_limited: false,
            },
            AgentTick::Running { task: 1, action: 0 },
            AgentTick::Running { task: 0, action: 0 },
            AgentTick::Completed,
            AgentTick::Idle,
        ]
    );
    assert_eq!(world.log, vec!["t2", "t1", "t3"]);
    assert!(world.facts.satisfies(&goal()));
    assert!(agent.needs_plan());
}

#[test]
fn private_facts_take_precedence_over_shared_ones() {
    let mut planner = Planner::default();
    let mut world = TestWorld::default();
    let tasks = library();

    // Privately the agent already believes fact 1 is 20.
    let private = WorldState::new().with(1, 20);
    let mut agent = GoapAgent::new(AgentId(4), tasks, private, goal());

    let tick = agent.tick(&mut planner, &start(), &mut world);
    assert_eq!(
        tick,
        AgentTick::Planned {
            steps: 2,
            depth_limited: false,
        }
    );
    assert!(!agent.plan().contains(&1));
    assert_eq!(agent.current_task().map(|t| t.name()), Some("t1"));
}

#[test]
fn failed_action_drops_the_plan_and_replans() {
    let tasks: Arc<[Task<TestWorld>]> = Arc::from(vec![Task::new("flaky")
        .with_action(record("prepare", 0, false))
        .with_action(Fail)]);
    let mut planner = Planner::default();
    let mut world = TestWorld::default();
    let start = WorldState::new().with(0, true);
    let goal = WorldState::new().with(0, false);
    let mut agent = GoapAgent::new(AgentId(2), tasks, start, goal);

    assert_eq!(
        agent.tick(&mut planner, &WorldState::new(), &mut world),
        AgentTick::Planned {
            steps: 1,
            depth_limited: false,
        }
    );
    assert_eq!(
        agent.tick(&mut planner, &WorldState::new(), &mut world),
        AgentTick::Running { task: 0, action: 0 }
    );
    assert_eq!(
        agent.tick(&mut planner, &WorldState::new(), &mut world),
        AgentTick::ActionFailed { task: 0, action: 1 }
    );
    assert!(agent.needs_plan());
    assert!(agent.plan().is_empty());
    assert!(matches!(
        agent.tick(&mut planner, &WorldState::new(), &mut world),
        AgentTick::Planned { .. }
    ));
    assert_eq!(world.log, vec!["prepare", "fail"]);
}

#[test]
fn planning_failure_is_reported_and_retried() {
    let mut planner = Planner::default();
    let mut world = TestWorld::default();
    let start = WorldState::new().with(0, true).with(5, "never");
    let goal = WorldState::new().with(5, "reached");
    let mut agent = GoapAgent::new(AgentId(3), library(), start, goal);

    for _ in 0..2 {
        let tick = agent.tick(&mut planner, &WorldState::new(), &mut world);
        assert!(matches!(
            tick,
            AgentTick::PlanFailed(PlanError::Exhausted { .. })
        ));
        assert!(agent.needs_plan());
    }
    assert!(world.log.is_empty());
}

#[test]
fn set_goal_forces_a_new_plan() {
    let mut planner = Planner::default();
    let mut world = TestWorld::default();
    let mut agent = GoapAgent::new(AgentId(1), library(), start(), goal());

    assert!(matches!(
        agent.tick(&mut planner, &WorldState::new(), &mut world),
        AgentTick::Planned { steps: 3, .. }
    ));
    agent.set_goal(WorldState::new().with(0, false));
    assert!(agent.needs_plan());
    assert_eq!(
        agent.tick(&mut planner, &WorldState::new(), &mut world),
        AgentTick::Planned {
            steps: 1,
            depth_limited: false,
        }
    );
    assert_eq!(agent.plan(), &[0]);
}

#[test]
fn agents_tick_in_id_order() {
    let mut planner = Planner::default();
    let mut world = TestWorld::default();
    let tasks = library();
    let mut agents: Vec<_> = [3u32, 1, 2]
        .into_iter()
        .map(|id| GoapAgent::new(id, tasks.clone(), start(), goal()))
        .collect();

    let ticks = tick_agents(&mut agents, &mut planner, &WorldState::new(), &mut world);
    let order: Vec<AgentId> = ticks.iter().map(|(id, _)| *id).collect();
    assert_eq!(order, vec![AgentId(1), AgentId(2), AgentId(3)]);
    assert!(ticks
        .iter()
        .all(|(_, tick)| matches!(tick, AgentTick::Planned { steps: 3, .. })));
}
