//! Measurements embedded at compile time.
//!
//! 48 runs: three implementations, each at 1/2/4/8 threads and 1/4/16/64 KiB
//! messages, 10 seconds per run. Counters come from `perf stat` on the server.

use crate::domain::dataset::{Dataset, ImplementationTable};
use crate::domain::errors::DatasetError;
use crate::domain::experiment::Implementation;

/// Host the measurements were taken on, drawn as the chart footer.
pub const SYSTEM_CONFIG: &str = "\
CPU: Intel Core i7-8750H @ 2.20GHz
Cache: L1d 32K, L1i 32K, L2 256K, L3 9216K
RAM: 16GB
OS: Ubuntu 22.04.3 LTS (on WSL2)
Kernel: 5.15.90.1-microsoft-standard-WSL2
GCC: 11.4.0";

const THREADS: [u32; 16] = [1, 1, 1, 1, 2, 2, 2, 2, 4, 4, 4, 4, 8, 8, 8, 8];
const MSG_SIZE: [u64; 16] = [
    1024, 4096, 16384, 65536, 1024, 4096, 16384, 65536, 1024, 4096, 16384, 65536, 1024, 4096,
    16384, 65536,
];
const DURATION: [u32; 16] = [10; 16];

mod two_copy {
    pub const THROUGHPUT: [f64; 16] = [
        1.330161, 3.967894, 13.980010, 27.197132, 2.297739, 6.283767, 20.531938, 38.296060,
        2.625095, 7.030993, 22.306982, 43.902117, 3.323042, 9.388556, 27.866117, 43.679302,
    ];
    pub const LATENCY: [f64; 16] = [
        6.106586, 8.206266, 9.324629, 19.223828, 7.068908, 10.362168, 12.701335, 27.307123,
        12.371866, 18.530874, 23.387225, 47.650630, 19.595317, 27.787847, 37.458576, 95.848492,
    ];
    pub const CPU_CYCLES: [u64; 16] = [
        22758370135, 23979066082, 24208362522, 24343126182, 42127350308, 38080862478,
        38779605333, 35606380847, 69312673004, 69404598468, 69663021914, 62209727106,
        92279435607, 91865686895, 81745956779, 72179164312,
    ];
    pub const INSTRUCTIONS: [u64; 16] = [
        21489179381, 23381077356, 19934367895, 17883592165, 38796684464, 35995178714,
        31441477336, 24851252612, 41259077965, 41376598207, 38816128610, 28584223235,
        56720981827, 57002801050, 41213201538, 22869757541,
    ];
    pub const CACHE_MISSES: [u64; 16] = [
        2326676, 1907807, 1203686, 1741771, 2100249, 2262948, 2088386, 2575626, 3817344,
        8678243, 25973959, 41239234, 44505967, 122632400, 468128002, 857849428,
    ];
    pub const BRANCHES: [u64; 16] = [
        3535239145, 3838972695, 3285398272, 3009458949, 6381965577, 5909479065, 5189933104,
        4187362382, 6782404375, 6796295502, 6403519263, 4812001627, 9291441784, 9311192811,
        6749049972, 3825752587,
    ];
    pub const BRANCH_MISSES: [u64; 16] = [
        70538371, 76339507, 60716655, 49465782, 127553126, 117444852, 98245943, 68644103,
        149698593, 147822798, 135444316, 83344815, 188183219, 189955985, 139720174, 69224696,
    ];
    pub const CONTEXT_SWITCHES: [u64; 16] = [
        1520, 327, 203, 222, 506, 582, 586, 191, 7825, 11826, 7697, 4304, 717280, 654900, 487281,
        398227,
    ];
}

mod one_copy {
    pub const THROUGHPUT: [f64; 16] = [
        1.196990, 3.153054, 11.166201, 23.390240, 1.864384, 4.940816, 16.683962, 35.509795,
        2.330034, 6.004763, 19.975341, 46.893808, 2.620820, 8.953111, 26.210986, 41.472874,
    ];
    pub const LATENCY: [f64; 16] = [
        6.791111, 10.332512, 11.679266, 22.355093, 8.712677, 13.182161, 15.632153, 29.450903,
        13.946929, 21.710354, 26.132631, 44.593974, 24.895879, 29.154814, 39.841064, 100.916577,
    ];
    pub const CPU_CYCLES: [u64; 16] = [
        23717037754, 21051870562, 21541739128, 21622275231, 33958140629, 33775082789,
        33853181989, 34203952575, 67509080175, 67910040378, 67097471854, 67233487800,
        90675207369, 94951414952, 80537914206, 67100394391,
    ];
    pub const INSTRUCTIONS: [u64; 16] = [
        22588866085, 20780531902, 18694703381, 16149098019, 29552317661, 31819295855,
        27279424922, 23429220922, 40520057126, 39876048803, 38631923113, 30622501956,
        53633248531, 58156455921, 41410258683, 24824546314,
    ];
    pub const CACHE_MISSES: [u64; 16] = [
        534206, 533378, 577624, 971809, 1198592, 1191388, 1817328, 4136797, 3901912, 5396950,
        15503925, 68322464, 22919291, 115286773, 400438801, 753261835,
    ];
    pub const BRANCHES: [u64; 16] = [
        3767704215, 3446347341, 3110400894, 2738104485, 4928758793, 5277298806, 4543128843,
        3968936079, 6756450176, 6614468175, 6423696353, 5187622168, 8934408427, 9599014740,
        6858439982, 4183151076,
    ];
    pub const BRANCH_MISSES: [u64; 16] = [
        71110796, 67316529, 57610601, 43047551, 93904477, 103149147, 85599084, 65113507,
        141938989, 141396310, 131963547, 89098692, 164896015, 190839230, 135976954, 75890266,
    ];
    pub const CONTEXT_SWITCHES: [u64; 16] = [
        369, 165, 245, 142, 397, 494, 683, 275, 6978, 7239, 8304, 3250, 905005, 681883, 516751,
        480001,
    ];
}

mod zero_copy {
    pub const THROUGHPUT: [f64; 16] = [
        0.379553, 1.249684, 3.432303, 8.872064, 0.720760, 2.291321, 6.970915, 16.497670,
        0.912258, 2.742203, 9.124664, 22.906465, 1.004202, 2.699432, 9.498833, 8.735863,
    ];
    pub const LATENCY: [f64; 16] = [
        15.341248, 17.714234, 23.133908, 47.875988, 16.001061, 19.647585, 24.191750, 48.359126,
        25.673157, 33.409755, 38.344806, 65.544446, 54.087076, 83.064790, 94.586326, 124.140046,
    ];
    pub const CPU_CYCLES: [u64; 16] = [
        15688797235, 15708949439, 15547759576, 15513631288, 31343390443, 31269125949,
        31209793626, 30845042087, 61247035412, 60329529645, 60910091760, 60730923846,
        68187111695, 83930803219, 84991165508, 44473920319,
    ];
    pub const INSTRUCTIONS: [u64; 16] = [
        16489576149, 16335609808, 16122144849, 16972028595, 30603628203, 30703418356,
        31994001556, 32700600930, 39148241938, 37116923581, 44100681177, 45873594139,
        39396003706, 48763447354, 51758419381, 27706376262,
    ];
    pub const CACHE_MISSES: [u64; 16] = [
        4073030, 7649031, 21391443, 4387198, 7582039, 13152514, 30751921, 23762973, 10558892,
        28336239, 52036339, 53856793, 17751539, 15495219, 15366466, 196822245,
    ];
    pub const BRANCHES: [u64; 16] = [
        2736024977, 2664162750, 2580687980, 2527644930, 5081348017, 5011658169, 5117384379,
        4907085863, 6506132901, 6060902259, 7069032362, 6900383821, 6558107437, 7990593647,
        8310208029, 4363271128,
    ];
    pub const BRANCH_MISSES: [u64; 16] = [
        34333955, 33938555, 28159243, 25105792, 65669959, 67177250, 57667548, 50202374,
        115013667, 110562834, 109468963, 86539689, 98557833, 118844643, 110756395, 56001053,
    ];
    pub const CONTEXT_SWITCHES: [u64; 16] = [
        670, 447, 1946, 217, 1082, 1113, 980, 318, 10921, 26826, 17183, 2709, 636158, 739803,
        695380, 87034,
    ];
}

/// Column tables for all three implementations, in canonical order.
pub fn tables() -> [ImplementationTable<'static>; 3] {
    [
        ImplementationTable {
            implementation: Implementation::TwoCopy,
            threads: &THREADS,
            msg_size: &MSG_SIZE,
            duration: &DURATION,
            throughput: &two_copy::THROUGHPUT,
            latency: &two_copy::LATENCY,
            cpu_cycles: &two_copy::CPU_CYCLES,
            instructions: &two_copy::INSTRUCTIONS,
            cache_misses: &two_copy::CACHE_MISSES,
            branches: &two_copy::BRANCHES,
            branch_misses: &two_copy::BRANCH_MISSES,
            context_switches: &two_copy::CONTEXT_SWITCHES,
        },
        ImplementationTable {
            implementation: Implementation::OneCopy,
            threads: &THREADS,
            msg_size: &MSG_SIZE,
            duration: &DURATION,
            throughput: &one_copy::THROUGHPUT,
            latency: &one_copy::LATENCY,
            cpu_cycles: &one_copy::CPU_CYCLES,
            instructions: &one_copy::INSTRUCTIONS,
            cache_misses: &one_copy::CACHE_MISSES,
            branches: &one_copy::BRANCHES,
            branch_misses: &one_copy::BRANCH_MISSES,
            context_switches: &one_copy::CONTEXT_SWITCHES,
        },
        ImplementationTable {
            implementation: Implementation::ZeroCopy,
            threads: &THREADS,
            msg_size: &MSG_SIZE,
            duration: &DURATION,
            throughput: &zero_copy::THROUGHPUT,
            latency: &zero_copy::LATENCY,
            cpu_cycles: &zero_copy::CPU_CYCLES,
            instructions: &zero_copy::INSTRUCTIONS,
            cache_misses: &zero_copy::CACHE_MISSES,
            branches: &zero_copy::BRANCHES,
            branch_misses: &zero_copy::BRANCH_MISSES,
            context_switches: &zero_copy::CONTEXT_SWITCHES,
        },
    ]
}

/// Builds the embedded dataset, validating column alignment.
pub fn load() -> Result<Dataset, DatasetError> {
    Dataset::from_tables(&tables())
}
