//
// Copyright (c) Dell Inc., or its subsidiaries. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//

use std::cell::RefCell;

use pcg_rand::Pcg32;
use rand::{Rng, SeedableRng};

thread_local! {
    pub(crate) static RNG: RefCell<Pcg32> = RefCell::new(Pcg32::from_entropy());
}

/// Function used to generate random u64.
pub(crate) fn get_random_u64() -> u64 {
    RNG.with(|rng| rng.borrow_mut().gen())
}

/// Function used to generate a random payload of the given size.
pub(crate) fn random_payload(size: usize) -> Vec<u8> {
    RNG.with(|rng| {
        let mut rng = rng.borrow_mut();
        (0..size).map(|_| rng.gen()).collect()
    })
}
