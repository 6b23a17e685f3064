/// Things that happened during a frame that the audio side cares about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameEvent {
    Fire,
    Explosion,
    ShieldPickup,
    WeaponPickup,
    PlayerDeath,
}
