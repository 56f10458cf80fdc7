//! `Region<N>` is the wire payload exchanged between ranks during
//! partitioning (see `geodecomp-partition`); a bincode round-trip must be
//! lossless.

use geodecomp_coord::{Coord, Streak};
use geodecomp_region::Region;

#[test]
fn region_survives_bincode_round_trip() {
    let mut region = Region::<2>::new();
    region.insert_streak(Streak::new(Coord::new([0, 0]), 5).unwrap());
    region.insert_streak(Streak::new(Coord::new([2, 3]), 9).unwrap());

    let bytes = bincode::serialize(&region).expect("serialize");
    let decoded: Region<2> = bincode::deserialize(&bytes).expect("deserialize");

    assert_eq!(region, decoded);
}
