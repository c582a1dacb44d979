use traffic_rl::env::DriveAction;
use traffic_rl::memory::{ReplayMemory, Transition};

fn tagged(reward: f32) -> Transition {
    Transition::new([0.5, 1.0], DriveAction::Hold, reward, [0.5, 1.0], false)
}

#[test]
fn oldest_transitions_are_evicted_first() {
    let mut memory = ReplayMemory::new(5, 1);
    for i in 0..8 {
        memory.add(tagged(i as f32));
    }
    assert_eq!(memory.len(), 5);

    // under-filled requests return everything in insertion order
    let survivors: Vec<f32> = memory.sample_batch(10).iter().map(|t| t.reward).collect();
    assert_eq!(survivors, vec![3.0, 4.0, 5.0, 6.0, 7.0]);
}

#[test]
fn short_memory_is_returned_whole() {
    let mut memory = ReplayMemory::new(1000, 1);
    assert!(memory.is_empty());
    for i in 0..3 {
        memory.add(tagged(i as f32));
    }
    let batch = memory.sample_batch(1000);
    let rewards: Vec<f32> = batch.iter().map(|t| t.reward).collect();
    assert_eq!(rewards, vec![0.0, 1.0, 2.0]);
}

#[test]
fn sampling_never_repeats_a_transition() {
    let mut memory = ReplayMemory::new(1000, 99);
    for i in 0..100 {
        memory.add(tagged(i as f32));
    }
    for _ in 0..10 {
        let batch = memory.sample_batch(64);
        assert_eq!(batch.len(), 64);
        let mut tags: Vec<i32> = batch.iter().map(|t| t.reward as i32).collect();
        tags.sort_unstable();
        tags.dedup();
        assert_eq!(tags.len(), 64);
        assert!(tags.iter().all(|tag| (0..100).contains(tag)));
    }
}

#[test]
fn capacity_is_respected_over_many_adds() {
    let mut memory = ReplayMemory::new(50, 7);
    for i in 0..500 {
        memory.add(tagged(i as f32));
    }
    assert_eq!(memory.len(), 50);
    let rewards: Vec<f32> = memory.sample_batch(50).iter().map(|t| t.reward).collect();
    assert_eq!(rewards[0], 450.0);
    assert_eq!(rewards[49], 499.0);
}
